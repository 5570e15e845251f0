//! Daemon control commands and their line encoding

use std::fmt;

use thiserror::Error;

use crate::domain::device::DeviceId;
use crate::domain::error::{DeviceIdParseError, ModifierFlagParseError};
use crate::domain::modifier::ModifierFlag;

/// Errors when decoding a control line
#[derive(Debug, Clone, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("message must be a JSON string: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    InvalidDevice(#[from] DeviceIdParseError),

    #[error(transparent)]
    InvalidFlag(#[from] ModifierFlagParseError),
}

/// Commands accepted by the daemon loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonCommand {
    /// Set the warning for a device
    SetDeviceMessage { device: DeviceId, message: String },
    /// Forget a device
    EraseDevice { device: DeviceId },
    /// Latch modifier flags as sticky
    LatchSticky { flags: Vec<ModifierFlag> },
    /// Release sticky modifier flags
    ReleaseSticky { flags: Vec<ModifierFlag> },
    /// Release every sticky flag
    ClearSticky,
    /// Query daemon status
    Status,
    /// Shutdown daemon (IPC, SIGINT or SIGTERM)
    Shutdown,
}

impl DaemonCommand {
    /// Decode one request line
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, rest) = split_word(line);

        match verb {
            "" => Err(CommandParseError::Empty),
            "status" => Ok(Self::Status),
            "shutdown" => Ok(Self::Shutdown),
            "device" => {
                let (action, rest) = split_word(rest);
                let (id, message) = split_word(rest);
                match action {
                    "set" => Ok(Self::SetDeviceMessage {
                        device: parse_device(id)?,
                        message: parse_message(message)?,
                    }),
                    "erase" => Ok(Self::EraseDevice {
                        device: parse_device(id)?,
                    }),
                    "" => Err(CommandParseError::MissingArgument("device action")),
                    other => Err(CommandParseError::Unknown(format!("device {}", other))),
                }
            }
            "sticky" => {
                let (action, rest) = split_word(rest);
                match action {
                    "set" => Ok(Self::LatchSticky {
                        flags: parse_flags(rest)?,
                    }),
                    "release" => Ok(Self::ReleaseSticky {
                        flags: parse_flags(rest)?,
                    }),
                    "clear" => Ok(Self::ClearSticky),
                    "" => Err(CommandParseError::MissingArgument("sticky action")),
                    other => Err(CommandParseError::Unknown(format!("sticky {}", other))),
                }
            }
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for DaemonCommand {
    /// Encode as a request line (without the trailing newline)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetDeviceMessage { device, message } => {
                let message = serde_json::to_string(message).map_err(|_| fmt::Error)?;
                write!(f, "device set {} {}", device, message)
            }
            Self::EraseDevice { device } => write!(f, "device erase {}", device),
            Self::LatchSticky { flags } => write!(f, "sticky set {}", join_flags(flags)),
            Self::ReleaseSticky { flags } => write!(f, "sticky release {}", join_flags(flags)),
            Self::ClearSticky => write!(f, "sticky clear"),
            Self::Status => write!(f, "status"),
            Self::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Split off the first space-separated word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start_matches(' ');
    match s.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (s, ""),
    }
}

fn parse_device(s: &str) -> Result<DeviceId, CommandParseError> {
    if s.is_empty() {
        return Err(CommandParseError::MissingArgument("device id"));
    }
    Ok(s.parse()?)
}

fn parse_flags(s: &str) -> Result<Vec<ModifierFlag>, CommandParseError> {
    let flags = s
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<ModifierFlag>, _>>()?;
    if flags.is_empty() {
        return Err(CommandParseError::MissingArgument("modifier flag"));
    }
    Ok(flags)
}

fn join_flags(flags: &[ModifierFlag]) -> String {
    flags
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the JSON string literal carrying a device message.
/// A missing message is the empty message.
fn parse_message(s: &str) -> Result<String, CommandParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(String::new());
    }
    serde_json::from_str(s).map_err(|e| CommandParseError::InvalidMessage(e.to_string()))
}
