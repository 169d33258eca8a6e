//! Configuration management for RepairDesk server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplatesConfig {
    /// Directory holding `layouts/`, `partials/` and `pages/`
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Served under `/static`
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Display name used when the request carries no user header
    pub default_user: String,
    /// Header set by the fronting proxy with the signed-in user's name
    pub user_header: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// Load the demo fixtures at startup (local development only)
    pub demo_data: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. REPAIRDESK__SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("REPAIRDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_user: "Admin User".to_string(),
            user_header: "x-remote-user".to_string(),
        }
    }
}
