//! Domain layer - Core business logic
//!
//! Contains value objects, the pure message merge rules, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod device;
pub mod error;
pub mod message;
pub mod modifier;

// Re-export common types
pub use config::AppConfig;
pub use device::DeviceId;
pub use error::*;
pub use message::{MessageBoard, NotificationDocument};
pub use modifier::{ModifierFlag, STICKY_SCAN_ORDER};
