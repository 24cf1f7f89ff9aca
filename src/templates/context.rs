// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Value, context};

#[derive(Debug, Clone)]
pub struct ErrorPageContext {
    app_name: String,
}

impl ErrorPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminIndexContext {
    app_name: String,
    admin_path: String,
    resources: serde_json::Value,
}

impl AdminIndexContext {
    pub fn new(app_name: &str, admin_path: &str, resources: serde_json::Value) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            resources,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            admin_path => &self.admin_path,
            resources => Value::from_serialize(&self.resources)
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagIndexContext {
    app_name: String,
    admin_path: String,
    query: String,
    tags: serde_json::Value,
}

impl TagIndexContext {
    pub fn new(app_name: &str, admin_path: &str, query: &str, tags: serde_json::Value) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            query: query.to_string(),
            tags,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            admin_path => &self.admin_path,
            query => &self.query,
            tags => Value::from_serialize(&self.tags)
        }
    }
}

/// Context for the tag form page, used both for creation (`mode == "new"`)
/// and for the read-only view of an existing tag (`mode == "show"`).
#[derive(Debug, Clone)]
pub struct TagFormContext {
    app_name: String,
    admin_path: String,
    mode: String,
    taxonomies: serde_json::Value,
    taxonomy_name: String,
    name: String,
    parent: String,
    path: String,
}

impl TagFormContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        app_name: &str,
        admin_path: &str,
        mode: &str,
        taxonomies: serde_json::Value,
        taxonomy_name: &str,
        name: &str,
        parent: &str,
        path: &str,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            mode: mode.to_string(),
            taxonomies,
            taxonomy_name: taxonomy_name.to_string(),
            name: name.to_string(),
            parent: parent.to_string(),
            path: path.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            admin_path => &self.admin_path,
            mode => &self.mode,
            taxonomies => Value::from_serialize(&self.taxonomies),
            taxonomy_name => &self.taxonomy_name,
            name => &self.name,
            parent => &self.parent,
            path => &self.path
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntityIndexContext {
    app_name: String,
    admin_path: String,
    query: String,
    entities: serde_json::Value,
}

impl EntityIndexContext {
    pub fn new(
        app_name: &str,
        admin_path: &str,
        query: &str,
        entities: serde_json::Value,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            query: query.to_string(),
            entities,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            admin_path => &self.admin_path,
            query => &self.query,
            entities => Value::from_serialize(&self.entities)
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaxonomyIndexContext {
    app_name: String,
    admin_path: String,
    taxonomies: serde_json::Value,
}

impl TaxonomyIndexContext {
    pub fn new(app_name: &str, admin_path: &str, taxonomies: serde_json::Value) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            taxonomies,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            admin_path => &self.admin_path,
            taxonomies => Value::from_serialize(&self.taxonomies)
        }
    }
}
