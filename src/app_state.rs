// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::runtime_paths::RuntimePaths;
use crate::store::Tagstore;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub runtime_paths: RuntimePaths,
    pub tagstore: Arc<Tagstore>,
}

impl AppState {
    pub fn new(runtime_paths: RuntimePaths, tagstore: Arc<Tagstore>) -> Self {
        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            runtime_paths,
            tagstore,
        }
    }
}
