// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Display and policy options for one resource exposed in the admin,
/// registered once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    pub label: &'static str,
    pub base_path: &'static str,
    pub list_display: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub change_enabled: bool,
}

#[derive(Debug)]
pub struct RegistryError {
    message: String,
}

impl RegistryError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RegistryError {}

#[derive(Debug, Default)]
pub struct AdminRegistry {
    resources: Vec<ResourceDescriptor>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<(), RegistryError> {
        if self
            .resources
            .iter()
            .any(|resource| resource.base_path == descriptor.base_path)
        {
            return Err(RegistryError::new(format!(
                "Resource already registered for path {}",
                descriptor.base_path
            )));
        }
        self.resources.push(descriptor);
        Ok(())
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }
}

pub fn build_default_registry() -> Result<AdminRegistry, RegistryError> {
    let mut registry = AdminRegistry::new();
    super::tags::register(&mut registry)?;
    super::entities::register(&mut registry)?;
    super::taxonomies::register(&mut registry)?;
    Ok(registry)
}
