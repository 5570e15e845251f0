//! Modifier flag definitions

use std::fmt;
use std::str::FromStr;

use super::error::ModifierFlagParseError;

/// Keyboard modifier flags that can be latched as sticky
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierFlag {
    CapsLock,
    LeftControl,
    LeftShift,
    LeftOption,
    LeftCommand,
    RightControl,
    RightShift,
    RightOption,
    RightCommand,
    Fn,
}

/// Order in which sticky modifiers are listed in the notification.
///
/// Caps lock is never listed.
pub const STICKY_SCAN_ORDER: [ModifierFlag; 9] = [
    ModifierFlag::LeftControl,
    ModifierFlag::LeftShift,
    ModifierFlag::LeftOption,
    ModifierFlag::LeftCommand,
    ModifierFlag::RightControl,
    ModifierFlag::RightShift,
    ModifierFlag::RightOption,
    ModifierFlag::RightCommand,
    ModifierFlag::Fn,
];

impl ModifierFlag {
    /// All known flags
    pub const ALL: [ModifierFlag; 10] = [
        ModifierFlag::CapsLock,
        ModifierFlag::LeftControl,
        ModifierFlag::LeftShift,
        ModifierFlag::LeftOption,
        ModifierFlag::LeftCommand,
        ModifierFlag::RightControl,
        ModifierFlag::RightShift,
        ModifierFlag::RightOption,
        ModifierFlag::RightCommand,
        ModifierFlag::Fn,
    ];

    /// Canonical snake_case name, as shown to the user
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CapsLock => "caps_lock",
            Self::LeftControl => "left_control",
            Self::LeftShift => "left_shift",
            Self::LeftOption => "left_option",
            Self::LeftCommand => "left_command",
            Self::RightControl => "right_control",
            Self::RightShift => "right_shift",
            Self::RightOption => "right_option",
            Self::RightCommand => "right_command",
            Self::Fn => "fn",
        }
    }

    /// Comma-separated list of valid names, for error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModifierFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModifierFlag {
    type Err = ModifierFlagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == lower)
            .ok_or_else(|| ModifierFlagParseError {
                input: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_is_left_then_right_then_fn() {
        let names: Vec<_> = STICKY_SCAN_ORDER.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec![
                "left_control",
                "left_shift",
                "left_option",
                "left_command",
                "right_control",
                "right_shift",
                "right_option",
                "right_command",
                "fn",
            ]
        );
    }

    #[test]
    fn scan_order_excludes_caps_lock() {
        assert!(!STICKY_SCAN_ORDER.contains(&ModifierFlag::CapsLock));
    }

    #[test]
    fn parse_round_trips_every_name() {
        for flag in ModifierFlag::ALL {
            assert_eq!(flag.name().parse::<ModifierFlag>().unwrap(), flag);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Left_Shift".parse::<ModifierFlag>().unwrap(),
            ModifierFlag::LeftShift
        );
    }

    #[test]
    fn parse_unknown_lists_valid_names() {
        let err = "hyper".parse::<ModifierFlag>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("hyper"));
        assert!(msg.contains("left_control"));
    }
}
