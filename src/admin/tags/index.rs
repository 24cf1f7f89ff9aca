// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::shared;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::store::{TagstoreError, TaxonomyId};
use crate::templates::TagIndexContext;
use actix_web::{HttpResponse, Result, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Deserialize)]
pub struct TagSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl TagSearchQuery {
    fn normalized(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Serialize)]
struct TagListItem {
    id: u32,
    taxonomy_name: String,
    name: String,
    path: String,
}

#[derive(Serialize)]
struct TagListSummary {
    id: u32,
    taxonomy_id: u32,
    name: String,
    parent_id: Option<u32>,
    path: String,
}

fn collect_list_items(
    app_state: &AppState,
    query: Option<&str>,
) -> std::result::Result<Vec<TagListItem>, TagstoreError> {
    let names: BTreeMap<TaxonomyId, String> = app_state
        .tagstore
        .list_taxonomies()?
        .into_iter()
        .map(|taxonomy| (taxonomy.id, taxonomy.name))
        .collect();
    let items = app_state
        .tagstore
        .list_tags(None, query)?
        .into_iter()
        .map(|tag| TagListItem {
            id: tag.id,
            taxonomy_name: names.get(&tag.taxonomy_id).cloned().unwrap_or_default(),
            name: tag.name,
            path: tag.path,
        })
        .collect();
    Ok(items)
}

pub async fn tags_index(
    query: web::Query<TagSearchQuery>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    log::info!("Admin tags index requested");
    let search = query.normalized();
    let tags = match collect_list_items(app_state.as_ref(), search) {
        Ok(tags) => tags,
        Err(err) => {
            log::error!("Failed to load tags for admin index: {}", err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let context = TagIndexContext::new(
        &config.app.name,
        &config.admin.path,
        search.unwrap_or(""),
        json!(tags),
    );
    shared::render_admin_page(
        app_state.as_ref(),
        "admin/tags_index.html",
        context.to_value(),
    )
}

pub async fn tags_list_api(
    query: web::Query<TagSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let tags = match app_state.tagstore.list_tags(None, query.normalized()) {
        Ok(tags) => tags,
        Err(err) => return Ok(shared::tagstore_error_response("list tags", &err)),
    };
    let tags: Vec<TagListSummary> = tags
        .into_iter()
        .map(|tag| TagListSummary {
            id: tag.id,
            taxonomy_id: tag.taxonomy_id,
            name: tag.name,
            parent_id: tag.parent_id,
            path: tag.path,
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({ "tags": tags })))
}
