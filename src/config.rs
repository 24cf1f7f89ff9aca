// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MIN_ADMIN_TOKEN_CHARS: usize = 16;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
}

/// Configuration after startup validation. The server refuses to start from a
/// raw `Config` that fails validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

impl ServerConfig {
    pub fn address_tuple(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    pub path: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;

        Self::validate_server(&config.server)?;
        Self::validate_admin(&config.admin)?;
        Self::validate_logging(&config.logging)?;

        Ok(ValidatedConfig {
            server: config.server,
            admin: config.admin,
            logging: config.logging,
            app: config.app,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }
        if server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_admin(admin: &AdminConfig) -> Result<(), ConfigError> {
        if !admin.path.starts_with('/') || admin.path.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "admin.path must start with '/' and name a path segment, got: '{}'",
                admin.path
            )));
        }
        if admin.path.ends_with('/') {
            return Err(ConfigError::ValidationError(
                "admin.path must not end with '/'".to_string(),
            ));
        }
        if admin.token.chars().count() < MIN_ADMIN_TOKEN_CHARS {
            return Err(ConfigError::ValidationError(format!(
                "admin.token must be at least {} characters",
                MIN_ADMIN_TOKEN_CHARS
            )));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        match logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "logging.level must be one of trace, debug, info, warn, error; got: '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
pub fn test_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            workers: 1,
        },
        admin: AdminConfig {
            path: "/admin".to_string(),
            token: "test-admin-token-0123456789".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        app: AppConfig {
            name: "Tagstore Test".to_string(),
            description: "Test configuration".to_string(),
        },
    }
}
