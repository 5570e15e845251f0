//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::device::DeviceId;
use crate::domain::modifier::ModifierFlag;

/// notemux - merges device warnings and sticky modifier state into one
/// notification message file
#[derive(Parser, Debug)]
#[command(name = "notemux")]
#[command(version)]
#[command(about = "Notification message aggregator for device warnings and sticky modifiers")]
#[command(long_about = None)]
pub struct Cli {
    /// Notification message file (overrides config)
    #[arg(long, value_name = "PATH", global = true, env = "NOTEMUX_MESSAGE_FILE")]
    pub message_file: Option<PathBuf>,

    /// Daemon control socket (overrides config)
    #[arg(long, value_name = "PATH", global = true, env = "NOTEMUX_SOCKET")]
    pub socket: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "notemux=trace" (RUST_LOG wins)
    #[arg(long, value_name = "FILTER", global = true, env = "NOTEMUX_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the aggregator daemon
    Serve,
    /// Set or erase per-device warnings on the running daemon
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },
    /// Latch, release or clear sticky modifiers on the running daemon
    Sticky {
        #[command(subcommand)]
        action: StickyAction,
    },
    /// Show daemon status
    Status,
    /// Stop the running daemon
    Stop,
    /// Print the current notification body
    Show,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Device warning actions
#[derive(Subcommand, Debug, Clone)]
pub enum DeviceAction {
    /// Set the warning for a device (an empty message clears it)
    Set {
        /// Device identifier
        id: DeviceId,
        /// Warning text
        #[arg(default_value = "")]
        message: String,
    },
    /// Forget a device
    Erase {
        /// Device identifier
        id: DeviceId,
    },
}

/// Sticky modifier actions
#[derive(Subcommand, Debug, Clone)]
pub enum StickyAction {
    /// Latch modifier flags as sticky
    Set {
        /// Flags such as left_shift, right_command, fn
        #[arg(required = true)]
        flags: Vec<ModifierFlag>,
    },
    /// Release sticky modifier flags
    Release {
        #[arg(required = true)]
        flags: Vec<ModifierFlag>,
    },
    /// Release all sticky modifiers
    Clear,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["message_file", "socket_path", "log_level"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
