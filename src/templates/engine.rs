// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Environment, Value, default_auto_escape_callback};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        // Error pages
        "error_404.html" => Some(include_str!("../admin/templates/error_404.html")),
        "error_500.html" => Some(include_str!("../admin/templates/error_500.html")),

        // Admin pages
        "admin/index.html" => Some(include_str!("../admin/templates/index.html")),
        "admin/tags_index.html" => Some(include_str!("../admin/templates/tags_index.html")),
        "admin/tag_form.html" => Some(include_str!("../admin/templates/tag_form.html")),
        "admin/entities_index.html" => {
            Some(include_str!("../admin/templates/entities_index.html"))
        }
        "admin/taxonomies_index.html" => {
            Some(include_str!("../admin/templates/taxonomies_index.html"))
        }

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
