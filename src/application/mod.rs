//! Application layer - Use cases and port interfaces
//!
//! Contains the serialized message manager, its dispatcher, and the trait
//! definitions for external system interactions.

pub mod dispatcher;
pub mod notification_message;
pub mod ports;

// Re-export use cases
pub use dispatcher::{Dispatcher, DispatcherError};
pub use notification_message::{
    build_sticky_modifiers_message, NotificationMessageManager, MESSAGE_DIR_MODE,
    MESSAGE_FILE_MODE,
};
