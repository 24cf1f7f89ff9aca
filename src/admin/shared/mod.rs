// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::store::TagstoreError;
use crate::templates::{ErrorPageContext, render_minijinja_template};
use actix_web::Result;
use actix_web::{HttpResponse, http::StatusCode};
use minijinja::Value;

pub fn json_error_response(message: &str, status_code: StatusCode) -> HttpResponse {
    let mut builder = HttpResponse::build(status_code);
    builder.content_type("application/json");
    builder.body(format!(
        "{{\"success\": false, \"message\": \"{}\"}}",
        message
    ))
}

/// Log detailed error server-side and return generic JSON error response to client
pub fn log_and_return_generic_error(
    operation: &str,
    error: &dyn std::fmt::Display,
    status_code: StatusCode,
) -> HttpResponse {
    // Log the detailed error for debugging
    log::error!("Failed to {}: {}", operation, error);

    // Return generic error message based on status code
    let generic_message = match status_code {
        StatusCode::BAD_REQUEST => "Invalid input provided",
        StatusCode::CONFLICT => "Resource already exists",
        StatusCode::NOT_FOUND => "Resource not found",
        StatusCode::FORBIDDEN => "Operation not permitted",
        StatusCode::INTERNAL_SERVER_ERROR => "An internal error occurred",
        _ => "An error occurred",
    };

    json_error_response(generic_message, status_code)
}

/// Maps store errors onto the shared JSON error shape.
pub fn tagstore_error_response(operation: &str, error: &TagstoreError) -> HttpResponse {
    let status_code = match error {
        TagstoreError::Validation(_) => StatusCode::BAD_REQUEST,
        TagstoreError::NotFound(_) => StatusCode::NOT_FOUND,
        TagstoreError::Conflict(_) => StatusCode::CONFLICT,
        TagstoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    log_and_return_generic_error(operation, error, status_code)
}

pub fn render_admin_page(
    app_state: &AppState,
    template_name: &str,
    context: Value,
) -> Result<HttpResponse> {
    let html = render_minijinja_template(app_state.templates.as_ref(), template_name, context)
        .map_err(|err| {
            log::error!("Failed to render template '{}': {}", template_name, err);
            actix_web::error::ErrorInternalServerError("Template rendering failed")
        })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub fn serve_404(app_name: &str, app_state: &AppState) -> Result<HttpResponse> {
    let context = ErrorPageContext::new(app_name).to_value();
    let html =
        match render_minijinja_template(app_state.templates.as_ref(), "error_404.html", context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render 404 error template: {}", e);
                fallback_404_html(app_name)
            }
        };

    Ok(HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .body(html))
}

pub fn serve_500(app_name: &str, app_state: &AppState) -> Result<HttpResponse> {
    let context = ErrorPageContext::new(app_name).to_value();
    let html =
        match render_minijinja_template(app_state.templates.as_ref(), "error_500.html", context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render 500 error template: {}", e);
                fallback_500_html(app_name)
            }
        };

    Ok(HttpResponse::InternalServerError()
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .body(html))
}

fn fallback_404_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>404 - Not Found | {}</title></head>
<body><h1>404 - Page Not Found</h1></body></html>"#,
        app_name
    )
}

fn fallback_500_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>500 - Internal Server Error | {}</title></head>
<body><h1>500 - Internal Server Error</h1></body></html>"#,
        app_name
    )
}
