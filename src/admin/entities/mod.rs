// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::registry::{AdminRegistry, RegistryError, ResourceDescriptor};

pub mod handlers;
pub mod index;

pub use handlers::configure;

pub fn register(registry: &mut AdminRegistry) -> Result<(), RegistryError> {
    registry.register(ResourceDescriptor {
        label: "Entities",
        base_path: "/entities",
        list_display: &["entity_type", "external_id"],
        search_fields: &["entity_type", "external_id"],
        change_enabled: false,
    })
}
