// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, Result, web};
use std::sync::Arc;
use tagstore::admin;
use tagstore::admin::AdminRegistry;
use tagstore::app_state::AppState;
use tagstore::config::{
    AdminConfig, AppConfig, LoggingConfig, ServerConfig, ValidatedConfig,
};
use tagstore::runtime_paths::RuntimePaths;
use tagstore::store::Tagstore;
use tagstore::util::test_fixtures::TestFixtureRoot;

pub const ADMIN_TOKEN: &str = "integration-test-admin-token";

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
    pub store: Arc<Tagstore>,
    pub registry: web::Data<AdminRegistry>,
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub registry: web::Data<AdminRegistry>,
    pub admin_path: String,
}

impl TestHarness {
    pub fn new() -> Self {
        let fixture = TestFixtureRoot::new_unique("admin-test-suite").expect("fixture root");
        fixture.init_runtime_layout().expect("fixture layout");

        let config = Arc::new(build_config());
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        let store =
            Arc::new(Tagstore::open(&runtime_paths.state_sys_dir).expect("tag store"));
        let app_state = Arc::new(AppState::new(runtime_paths.clone(), store.clone()));
        let registry =
            web::Data::new(admin::build_default_registry().expect("admin registry"));

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
            store,
            registry,
        }
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            app_state: self.app_state.clone(),
            registry: self.registry.clone(),
            admin_path: self.config.admin.path.clone(),
        }
    }
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let admin_path = bundle.admin_path;
    let config_for_app = bundle.config.clone();
    let config_for_admin = bundle.config.clone();

    App::new()
        .app_data(web::Data::from(config_for_app))
        .app_data(web::Data::from(bundle.app_state))
        .app_data(bundle.registry)
        .configure(move |cfg| admin::configure(cfg, &admin_path, &config_for_admin))
        .default_service(web::route().to(test_default_not_found))
}

async fn test_default_not_found(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    tagstore::admin::shared::serve_404(&config.app.name, app_state.as_ref())
}

pub fn auth_header() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", ADMIN_TOKEN))
}

fn build_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            workers: 1,
        },
        admin: AdminConfig {
            path: "/admin".to_string(),
            token: ADMIN_TOKEN.to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        app: AppConfig {
            name: "Tagstore Test".to_string(),
            description: "Test Description".to_string(),
        },
    }
}
