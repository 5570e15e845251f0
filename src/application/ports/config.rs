//! Settings storage port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Where the `notemux config` subcommands and startup read settings from
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings. A missing file yields an all-`None` config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> PathBuf;

    /// Whether the settings file is present
    fn exists(&self) -> bool;

    /// Write [`AppConfig::defaults`]; `AlreadyExists` if a file is present
    async fn init(&self) -> Result<(), ConfigError>;
}
