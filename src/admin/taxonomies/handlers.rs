// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, base_path: &str) {
    cfg.route(base_path, web::get().to(super::index::taxonomies_index))
        .route(
            &format!("{}/list-api", base_path),
            web::get().to(super::index::taxonomies_list_api),
        )
        .route(
            &format!("{}/create-api", base_path),
            web::post().to(super::edit::taxonomies_create),
        )
        .route(
            &format!("{}/delete-api", base_path),
            web::delete().to(super::edit::taxonomies_delete),
        );
}
