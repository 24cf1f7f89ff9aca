// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::shared;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::store::Entity;
use crate::templates::EntityIndexContext;
use actix_web::{HttpResponse, Result, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Deserialize)]
pub struct EntitySearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl EntitySearchQuery {
    fn normalized(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Serialize)]
struct EntityListItem {
    id: u32,
    entity_type: String,
    external_id: String,
}

fn to_items(entities: Vec<Entity>) -> Vec<EntityListItem> {
    entities
        .into_iter()
        .map(|entity| EntityListItem {
            id: entity.id,
            entity_type: entity.entity_type,
            external_id: entity.external_id,
        })
        .collect()
}

pub async fn entities_index(
    query: web::Query<EntitySearchQuery>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    log::info!("Admin entities index requested");
    let search = query.normalized();
    let entities = match app_state.tagstore.list_entities(search) {
        Ok(entities) => to_items(entities),
        Err(err) => {
            log::error!("Failed to load entities for admin index: {}", err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let context = EntityIndexContext::new(
        &config.app.name,
        &config.admin.path,
        search.unwrap_or(""),
        json!(entities),
    );
    shared::render_admin_page(
        app_state.as_ref(),
        "admin/entities_index.html",
        context.to_value(),
    )
}

pub async fn entities_list_api(
    query: web::Query<EntitySearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let entities = match app_state.tagstore.list_entities(query.normalized()) {
        Ok(entities) => to_items(entities),
        Err(err) => return Ok(shared::tagstore_error_response("list entities", &err)),
    };
    Ok(HttpResponse::Ok().json(json!({ "entities": entities })))
}
