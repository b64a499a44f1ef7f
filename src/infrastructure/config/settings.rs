//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file, then environment variables
//! override deployment-specific values (`PORT`, `DATABASE_PATH`,
//! `SERVER_URL`, `ADMIN_IDS`) and supply the bot token
//! (`TELEGRAM_BOT_TOKEN`).
//!
//! # Example
//!
//! ```no_run
//! use ultratrack::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::resolve("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::logging::LoggingConfig;
use super::race::RaceConfig;
use super::server::ServerConfig;
use super::storage::{StorageBackend, StorageConfig};
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Error, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP API listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// Race store backend.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Race window defaults and time-input rules.
    #[serde(default)]
    pub race: RaceConfig,

    /// Telegram bot settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists (defaults otherwise), apply environment
    /// overrides, and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or invalid, or an
    /// environment variable holds a bad value.
    #[allow(clippy::result_large_err)]
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-numeric `PORT` or
    /// `ADMIN_IDS` entry.
    #[allow(clippy::result_large_err)]
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = Some(token);
        }
        if let Some(url) = get("SERVER_URL") {
            self.server.public_url = Some(url);
        }
        if let Some(path) = get("DATABASE_PATH") {
            self.storage.database_path = path;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("`{port}` is not a port number"),
            })?;
        }
        if let Some(ids) = get("ADMIN_IDS") {
            self.telegram.admin_ids = parse_admin_ids(&ids)?;
        }
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Base URL for the remote store. Never derived from `server.public_url`.
    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        self.storage.remote_url.as_deref()
    }

    /// Check that this configuration can back a process serving the API.
    ///
    /// The remote store forwards to an API, so serving the API over it
    /// would make the process a proxy of itself or of another instance.
    #[allow(clippy::result_large_err)]
    pub fn check_api_backend(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Remote {
            return Err(ConfigError::InvalidValue {
                field: "storage.backend",
                reason: "\"remote\" can only back the bot; serve the API over sqlite or memory"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// URL opened by the bot's mini-app button.
    #[must_use]
    pub fn web_app_url(&self) -> Option<&str> {
        self.telegram
            .web_app_url
            .as_deref()
            .or(self.server.public_url.as_deref())
    }

    /// Log configuration choices an operator should know about.
    pub fn warn_on_open_defaults(&self) {
        if self.telegram.admin_ids.is_empty() {
            warn!("No admin ids configured; every Telegram user can change the race state");
        }
        if self.storage.backend == StorageBackend::Memory {
            warn!("Memory store selected; race state is lost on exit");
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        self.server.socket_addr()?;

        if self.storage.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        match self.storage.backend {
            StorageBackend::Sqlite if self.storage.database_path.trim().is_empty() => {
                return Err(ConfigError::MissingField {
                    field: "storage.database_path",
                }
                .into());
            }
            StorageBackend::Remote if self.remote_url().is_none() => {
                return Err(ConfigError::MissingField {
                    field: "storage.remote_url",
                }
                .into());
            }
            _ => {}
        }

        self.race.default_start()?;
        self.race.display_offset()?;
        if self.race.duration_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "race.duration_hours",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[allow(clippy::result_large_err)]
fn parse_admin_ids(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>().map_err(|_| {
                Error::from(ConfigError::InvalidValue {
                    field: "ADMIN_IDS",
                    reason: format!("`{id}` is not a numeric user id"),
                })
            })
        })
        .collect()
}
