// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpResponse, HttpServer, Result, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::sync::Arc;

mod admin;
mod app_state;
mod bootstrap;
mod config;
mod runtime_paths;
mod store;
mod templates;
mod util;

use admin::build_default_registry;
use app_state::AppState;
use config::ValidatedConfig;
use runtime_paths::RuntimePaths;
use store::Tagstore;

const HELP_TEXT: &str = "tagstore - admin service for a hierarchical tagging data model

Usage: tagstore [-C <root>] [-h | --help]

  -C <root>    Runtime directory holding config.yaml and state/ (default: .)
  -h, --help   Show this help text
";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print!("{}", HELP_TEXT);
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    let result = System::new().block_on(run_server(bootstrap));
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    // Parse log level from config
    let log_level = match validated_config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|error| {
            eprintln!("❌ Failed to initialize logger: {}", error);
            std::io::Error::other(error.to_string())
        })?;

    log_startup_info(&validated_config, &runtime_paths);

    let tagstore = match Tagstore::open(&runtime_paths.state_sys_dir) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            eprintln!("❌ Failed to open tag store: {}", error);
            eprintln!("❌ Application cannot start with an inconsistent store.");
            return Err(std::io::Error::other(error.to_string()));
        }
    };
    info!("✅ Tag store opened successfully");

    let registry = match build_default_registry() {
        Ok(registry) => web::Data::new(registry),
        Err(error) => {
            eprintln!("❌ Failed to initialize admin registry: {}", error);
            return Err(std::io::Error::other(error.to_string()));
        }
    };
    info!("✅ Admin registry initialized successfully");

    let app_state = Arc::new(AppState::new(runtime_paths, tagstore));
    info!(
        "✅ App state initialized with app name: {}",
        validated_config.app.name
    );

    let admin_path = validated_config.admin.path.clone();
    let workers = validated_config.server.workers;
    let address = validated_config.server.address_tuple();
    let address = (address.0.to_string(), address.1);

    let factory = {
        let admin_path = admin_path.clone();
        let config_for_app = validated_config.clone();
        let config_for_admin = validated_config.clone();
        let app_state_for_app = app_state.clone();
        let registry = registry.clone();

        move || {
            let admin_path_clone = admin_path.clone();
            let config_for_app = config_for_app.clone();
            let config_for_admin = config_for_admin.clone();
            let app_state_for_app = app_state_for_app.clone();

            App::new()
                .app_data(web::Data::from(config_for_app))
                .app_data(web::Data::from(app_state_for_app))
                .app_data(registry.clone())
                .wrap(Logger::new(
                    r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
                ))
                .configure(move |cfg| admin::configure(cfg, &admin_path_clone, &config_for_admin))
                .default_service(web::route().to(default_not_found))
        }
    };

    HttpServer::new(factory)
        .workers(workers)
        .bind(address)?
        .run()
        .await
}

async fn default_not_found(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    admin::shared::serve_404(&config.app.name, app_state.as_ref())
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {} - {}", config.app.name, config.app.description);
    info!("Workers: {}", config.server.workers);
    info!(
        "Listening on {}:{}",
        config.server.host, config.server.port
    );
    info!(
        "Admin panel available at: http://{}:{}{}",
        config.server.host, config.server.port, config.admin.path
    );

    // Log canonical paths being used by the server
    info!("State directory (canonical): {}", runtime_paths.state_dir.display());
    info!(
        "State sys directory (canonical): {}",
        runtime_paths.state_sys_dir.display()
    );
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Runtime root: {}", runtime_paths.root.display());
}

#[derive(Debug)]
enum RunMode {
    Serve,
    Help,
}

#[derive(Debug)]
struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else if arg.eq_ignore_ascii_case("help") {
            return Ok(ParsedArgs {
                runtime_root,
                mode: RunMode::Help,
            });
        } else {
            return Err(format!("Unknown argument: {}", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;

    Ok(ParsedArgs {
        runtime_root,
        mode: RunMode::Serve,
    })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}
