//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod delivery;
pub mod modifier_source;
pub mod sink;

// Re-export common types
pub use config::ConfigStore;
pub use delivery::DeliveryClient;
pub use modifier_source::ModifierFlagSource;
pub use sink::{MessageSink, SinkError};
