//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional base file, an optional environment overlay, and
//! `HEARTHBASE__*` environment variables.

pub mod app;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::app::AppSettings;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// General application settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// `base` is a file path without extension (e.g. `config/default`);
    /// `config/<env>` is layered on top of it, then environment variables
    /// prefixed with `HEARTHBASE__` (e.g. `HEARTHBASE__APP__DATA_DIR`).
    /// Missing files are not an error.
    pub fn load(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HEARTHBASE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(base = %base, env = %env, "Configuration loaded");
        Ok(loaded)
    }
}
