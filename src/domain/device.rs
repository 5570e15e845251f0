//! Device identifier value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DeviceIdParseError;

/// Opaque identifier of a connected input device.
///
/// Ordering is the numeric order of the raw value; the message merge relies
/// on it to pick a device warning deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Wrap a raw device identifier
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DeviceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = DeviceIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DeviceIdParseError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal() {
        let id: DeviceId = "42".parse().unwrap();
        assert_eq!(id, DeviceId::new(42));
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: DeviceId = " 7\n".parse().unwrap();
        assert_eq!(id, DeviceId::new(7));
    }

    #[test]
    fn rejects_garbage() {
        let err = "keyboard".parse::<DeviceId>().unwrap_err();
        assert_eq!(err.input, "keyboard");
        assert!(err.to_string().contains("keyboard"));
    }

    #[test]
    fn rejects_negative() {
        assert!("-1".parse::<DeviceId>().is_err());
    }

    #[test]
    fn orders_numerically() {
        assert!(DeviceId::new(2) < DeviceId::new(10));
    }

    #[test]
    fn display() {
        assert_eq!(DeviceId::new(1234).to_string(), "1234");
    }
}
