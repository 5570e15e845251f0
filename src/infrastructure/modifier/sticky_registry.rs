//! In-process record of latched (sticky) modifier flags

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::application::ports::ModifierFlagSource;
use crate::domain::modifier::ModifierFlag;

/// Thread-safe set of sticky modifier flags.
///
/// The daemon latches and releases flags as control commands arrive and
/// hands the registry to the message manager as its modifier source.
#[derive(Debug, Default)]
pub struct StickyModifierRegistry {
    active: RwLock<BTreeSet<ModifierFlag>>,
}

impl StickyModifierRegistry {
    /// Create a registry with no active flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark flags as sticky-active
    pub fn latch(&self, flags: &[ModifierFlag]) {
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        active.extend(flags.iter().copied());
    }

    /// Clear the sticky state of the given flags
    pub fn release(&self, flags: &[ModifierFlag]) {
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        for flag in flags {
            active.remove(flag);
        }
    }

    /// Clear every sticky flag
    pub fn clear(&self) {
        self.active
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Currently active flags, in declaration order
    pub fn active(&self) -> Vec<ModifierFlag> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .copied()
            .collect()
    }

    /// Whether no flag is latched
    pub fn is_empty(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

impl ModifierFlagSource for StickyModifierRegistry {
    fn is_sticky_active(&self, flag: ModifierFlag) -> bool {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&flag)
    }
}
