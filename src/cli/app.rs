//! Shared app plumbing: exit codes, config layering, logging

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::infrastructure::{default_message_file_path, XdgConfigStore};

use super::args::Cli;
use super::ipc::SocketPath;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Config values given on the command line (or their env fallbacks)
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        message_file: cli.message_file.clone(),
        socket_path: cli.socket.clone(),
        log_level: cli.log_level.clone(),
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli (clap already folds env vars into cli)
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Load merged config from the default XDG location
pub async fn load_config(cli: &Cli) -> AppConfig {
    load_merged_config(&XdgConfigStore::new(), cli_config(cli)).await
}

/// Message file from config, or the platform default
pub fn resolve_message_file(config: &AppConfig) -> PathBuf {
    config
        .message_file
        .clone()
        .unwrap_or_else(default_message_file_path)
}

/// Control socket from config, or the platform default
pub fn resolve_socket_path(config: &AppConfig) -> SocketPath {
    config
        .socket_path
        .clone()
        .map(SocketPath::with_path)
        .unwrap_or_default()
}

/// Install the global tracing subscriber, writing to stderr.
///
/// RUST_LOG takes precedence over the configured level. Calling this twice
/// is harmless.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level_or_default()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
