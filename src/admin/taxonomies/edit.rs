// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::shared;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::store::TaxonomyId;
use actix_web::{Either, HttpResponse, Result, web};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TaxonomyCreatePayload {
    pub name: String,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub taxonomy: TaxonomyId,
}

pub async fn taxonomies_create(
    payload: Either<web::Json<TaxonomyCreatePayload>, web::Form<TaxonomyCreatePayload>>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    match app_state.tagstore.create_taxonomy(payload.name.trim()) {
        Ok(taxonomy) => {
            log::info!("Created taxonomy '{}'", taxonomy.name);
            Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(format!(
                    "{{\"success\": true, \"message\": \"Taxonomy created successfully\", \"redirect\": \"{}/taxonomies\"}}",
                    config.admin.path
                )))
        }
        Err(err) => Ok(shared::tagstore_error_response("create taxonomy", &err)),
    }
}

/// Deletes a taxonomy together with all of its tags.
pub async fn taxonomies_delete(
    query: web::Query<DeleteQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match app_state.tagstore.delete_taxonomy(query.taxonomy) {
        Ok(()) => {
            log::info!("Deleted taxonomy {}", query.taxonomy);
            Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body("{\"success\": true, \"message\": \"Taxonomy deleted successfully\"}"))
        }
        Err(err) => Ok(shared::tagstore_error_response("delete taxonomy", &err)),
    }
}
