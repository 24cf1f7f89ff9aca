// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::shared;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::store::Taxonomy;
use crate::templates::TaxonomyIndexContext;
use actix_web::{HttpResponse, Result, web};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct TaxonomyListItem {
    id: u32,
    name: String,
}

fn to_items(taxonomies: Vec<Taxonomy>) -> Vec<TaxonomyListItem> {
    taxonomies
        .into_iter()
        .map(|taxonomy| TaxonomyListItem {
            id: taxonomy.id,
            name: taxonomy.name,
        })
        .collect()
}

pub async fn taxonomies_index(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    log::info!("Admin taxonomies index requested");
    let taxonomies = match app_state.tagstore.list_taxonomies() {
        Ok(taxonomies) => to_items(taxonomies),
        Err(err) => {
            log::error!("Failed to load taxonomies for admin index: {}", err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let context =
        TaxonomyIndexContext::new(&config.app.name, &config.admin.path, json!(taxonomies));
    shared::render_admin_page(
        app_state.as_ref(),
        "admin/taxonomies_index.html",
        context.to_value(),
    )
}

pub async fn taxonomies_list_api(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let taxonomies = match app_state.tagstore.list_taxonomies() {
        Ok(taxonomies) => to_items(taxonomies),
        Err(err) => return Ok(shared::tagstore_error_response("list taxonomies", &err)),
    };
    Ok(HttpResponse::Ok().json(json!({ "taxonomies": taxonomies })))
}
