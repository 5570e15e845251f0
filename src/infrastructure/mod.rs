//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the JSON
//! message file writer, the sticky modifier registry and config storage.

pub mod config;
pub mod modifier;
pub mod paths;
pub mod persistence;

// Re-export adapters
pub use config::XdgConfigStore;
pub use modifier::StickyModifierRegistry;
pub use paths::default_message_file_path;
pub use persistence::JsonFileWriter;
