//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log level used when neither config nor RUST_LOG set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the merged notification message is written
    pub message_file: Option<PathBuf>,
    /// Daemon control socket
    pub socket_path: Option<PathBuf>,
    /// tracing filter directive (e.g. "info", "notemux=debug")
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// Paths are left unset here; they depend on the runtime environment and
    /// are resolved by the infrastructure layer.
    pub fn defaults() -> Self {
        Self {
            message_file: None,
            socket_path: None,
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            message_file: other.message_file.or(self.message_file),
            socket_path: other.socket_path.or(self.socket_path),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get log level, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
