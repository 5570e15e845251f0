//! Modifier flag source port interface

use crate::domain::modifier::ModifierFlag;

/// Port for querying latched modifier state.
///
/// Queried from arbitrary caller threads, hence `Sync`.
pub trait ModifierFlagSource: Send + Sync {
    /// Whether `flag` is currently latched as sticky.
    fn is_sticky_active(&self, flag: ModifierFlag) -> bool;

    /// Human-readable label for `flag`. Flags without a label are left out
    /// of the sticky modifiers message.
    fn display_name(&self, flag: ModifierFlag) -> Option<String> {
        Some(flag.name().to_string())
    }
}
