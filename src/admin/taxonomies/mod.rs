// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::registry::{AdminRegistry, RegistryError, ResourceDescriptor};

pub mod edit;
pub mod handlers;
pub mod index;

pub use handlers::configure;

pub fn register(registry: &mut AdminRegistry) -> Result<(), RegistryError> {
    registry.register(ResourceDescriptor {
        label: "Taxonomies",
        base_path: "/taxonomies",
        list_display: &["id", "name"],
        search_fields: &[],
        change_enabled: true,
    })
}
