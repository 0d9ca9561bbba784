//! General application settings.

use serde::{Deserialize, Serialize};

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Human readable application name, used in log output.
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory holding application data. Created on bootstrap.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Development mode.
    #[serde(default)]
    pub is_dev: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            is_dev: false,
        }
    }
}

fn default_name() -> String {
    "Hearthbase".to_string()
}

fn default_data_dir() -> String {
    "hb_data".to_string()
}
