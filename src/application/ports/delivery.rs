//! Notification delivery client port interface

/// Client that delivers notifications to the user session.
///
/// The message manager only holds a weak handle to it.
pub trait DeliveryClient: Send + Sync {
    /// Whether the client currently has a live connection
    fn is_connected(&self) -> bool;
}
