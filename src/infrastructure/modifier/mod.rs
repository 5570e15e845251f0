//! Modifier state infrastructure module

mod sticky_registry;

pub use sticky_registry::StickyModifierRegistry;
