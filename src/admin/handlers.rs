// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::registry::AdminRegistry;
use crate::admin::{entities, middleware, shared, tags, taxonomies};
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::templates::AdminIndexContext;
use actix_web::{HttpResponse, Result, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, admin_path: &str, config: &Arc<ValidatedConfig>) {
    // Apply authentication middleware to all admin routes
    cfg.service(
        web::scope(admin_path)
            .wrap(middleware::RequireAdminMiddleware::new(config.clone()))
            .route("", web::get().to(admin_index))
            .configure(|cfg| {
                entities::configure(cfg, "/entities");
                tags::configure(cfg, "/tags");
                taxonomies::configure(cfg, "/taxonomies");
            }),
    );
}

async fn admin_index(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
    registry: web::Data<AdminRegistry>,
) -> Result<HttpResponse> {
    let resources = serde_json::to_value(registry.resources()).map_err(|err| {
        log::error!("Failed to serialize admin resources: {}", err);
        actix_web::error::ErrorInternalServerError("Template rendering failed")
    })?;
    let context = AdminIndexContext::new(&config.app.name, &config.admin.path, resources);
    shared::render_admin_page(app_state.as_ref(), "admin/index.html", context.to_value())
}
