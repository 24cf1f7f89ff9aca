// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::shared;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::store::{TagId, TaxonomyId};
use crate::templates::TagFormContext;
use actix_web::{Either, HttpResponse, Result, http::StatusCode, web};
use serde::Serialize;
use serde_json::json;

#[derive(serde::Deserialize)]
pub struct TagCreatePayload {
    pub taxonomy: TaxonomyId,
    pub name: String,
    #[serde(default)]
    pub parent: String,
}

#[derive(Serialize)]
struct TaxonomyOption {
    id: u32,
    name: String,
}

/// Renders the creation form. The synthetic `parent` field starts empty: a
/// new tag has no current parent to display.
pub async fn tags_new(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let taxonomies: Vec<TaxonomyOption> = match app_state.tagstore.list_taxonomies() {
        Ok(taxonomies) => taxonomies
            .into_iter()
            .map(|taxonomy| TaxonomyOption {
                id: taxonomy.id,
                name: taxonomy.name,
            })
            .collect(),
        Err(err) => {
            log::error!("Failed to list taxonomies: {}", err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let context = TagFormContext::new(
        &config.app.name,
        &config.admin.path,
        "new",
        json!(taxonomies),
        "",
        "",
        "",
        "",
    );
    shared::render_admin_page(
        app_state.as_ref(),
        "admin/tag_form.html",
        context.to_value(),
    )
}

/// Renders the read-only view of an existing tag. The `parent` field is
/// prefilled with the parent tag's name, or left empty for a root tag.
pub async fn tags_show(
    path: web::Path<TagId>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let tag_id = path.into_inner();
    let tag = match app_state.tagstore.tag(tag_id) {
        Ok(Some(tag)) => tag,
        Ok(None) => return shared::serve_404(&config.app.name, app_state.as_ref()),
        Err(err) => {
            log::error!("Failed to load tag {}: {}", tag_id, err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let related = tag.parent_id.map_or(Ok(None), |parent_id| {
        app_state.tagstore.tag(parent_id)
    });
    let parent_name = match related {
        Ok(parent) => parent.map(|parent| parent.name).unwrap_or_default(),
        Err(err) => {
            log::error!("Failed to load parent of tag {}: {}", tag_id, err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };
    let taxonomy_name = match app_state.tagstore.taxonomy(tag.taxonomy_id) {
        Ok(taxonomy) => taxonomy.map(|taxonomy| taxonomy.name).unwrap_or_default(),
        Err(err) => {
            log::error!("Failed to load taxonomy {}: {}", tag.taxonomy_id, err);
            return shared::serve_500(&config.app.name, app_state.as_ref());
        }
    };

    let context = TagFormContext::new(
        &config.app.name,
        &config.admin.path,
        "show",
        json!([]),
        &taxonomy_name,
        &tag.name,
        &parent_name,
        &tag.path,
    );
    shared::render_admin_page(
        app_state.as_ref(),
        "admin/tag_form.html",
        context.to_value(),
    )
}

/// Saves a new tag: resolves the typed parent name to an id within the same
/// taxonomy, then delegates creation to the store's `add_tag`.
pub async fn tags_create(
    payload: Either<web::Json<TagCreatePayload>, web::Form<TagCreatePayload>>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    let name = payload.name.trim();
    let parent = payload.parent.trim();

    let parent_id = if parent.is_empty() {
        None
    } else {
        match app_state.tagstore.tag_by_name(payload.taxonomy, parent) {
            Ok(Some(parent_tag)) => Some(parent_tag.id),
            Ok(None) => {
                // An unknown parent name surfaces as a generic server error;
                // there is no field-level validation message for it.
                log::error!(
                    "Parent tag '{}' not found in taxonomy {}",
                    parent,
                    payload.taxonomy
                );
                return Ok(shared::json_error_response(
                    "An internal error occurred",
                    StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            Err(err) => {
                return Ok(shared::log_and_return_generic_error(
                    "resolve parent tag",
                    &err,
                    StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
        }
    };

    match app_state.tagstore.add_tag(payload.taxonomy, name, parent_id) {
        Ok(tag) => {
            log::info!("Created tag '{}' with path '{}'", tag.name, tag.path);
            Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(format!(
                    "{{\"success\": true, \"message\": \"Tag created successfully\", \"redirect\": \"{}/tags/show/{}\"}}",
                    config.admin.path, tag.id
                )))
        }
        Err(err) => Ok(shared::tagstore_error_response("create tag", &err)),
    }
}

/// Tags are immutable through the admin; the change permission is always denied.
pub async fn tags_save(path: web::Path<TagId>) -> Result<HttpResponse> {
    log::warn!("Rejected attempt to modify tag {}", path.into_inner());
    Ok(shared::json_error_response(
        "Operation not permitted",
        StatusCode::FORBIDDEN,
    ))
}

pub async fn tags_delete() -> Result<HttpResponse> {
    log::warn!("Rejected attempt to delete a tag");
    Ok(shared::json_error_response(
        "Operation not permitted",
        StatusCode::FORBIDDEN,
    ))
}
