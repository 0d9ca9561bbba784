//! Application lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fired once the app has prepared its data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapEvent {
    /// Resolved data directory.
    pub data_dir: String,
    /// Whether the app runs in development mode.
    pub is_dev: bool,
}

/// Wraps the serving window. The base action completes when the app is
/// asked to shut down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeEvent {
    /// When serving started.
    pub started_at: DateTime<Utc>,
    /// When serving stopped. Set once the base action returns.
    pub stopped_at: Option<DateTime<Utc>>,
}

/// Fired when the app is terminating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminateEvent {
    /// True when the process is about to restart rather than exit.
    pub is_restart: bool,
}
