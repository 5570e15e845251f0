//! Domain error types

use thiserror::Error;

/// Error when parsing a device identifier
#[derive(Debug, Clone, Error)]
#[error("Invalid device id: \"{input}\". Expected a non-negative integer (e.g., 42)")]
pub struct DeviceIdParseError {
    pub input: String,
}

/// Error when an unknown modifier flag name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid modifier flag: \"{input}\". Valid flags are: {valid}")]
pub struct ModifierFlagParseError {
    pub input: String,
    pub valid: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
