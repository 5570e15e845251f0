//! Notification message state and merge rules

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::device::DeviceId;

/// Document written to the notification message file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationDocument {
    pub body: String,
}

impl NotificationDocument {
    /// Create a document with the given body
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Message sources combined into the notification body.
///
/// Device warnings are keyed by device; at most one of them is shown.
/// The sticky modifiers message is a preformatted block of lines.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    device_messages: BTreeMap<DeviceId, String>,
    sticky_modifiers_message: String,
}

impl MessageBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the message for a device
    pub fn set_device_message(&mut self, id: DeviceId, message: impl Into<String>) {
        self.device_messages.insert(id, message.into());
    }

    /// Remove a device entry. Absent devices are ignored.
    pub fn erase_device(&mut self, id: DeviceId) {
        self.device_messages.remove(&id);
    }

    /// Replace the sticky modifiers message
    pub fn set_sticky_modifiers_message(&mut self, message: impl Into<String>) {
        self.sticky_modifiers_message = message.into();
    }

    /// Current sticky modifiers message
    pub fn sticky_modifiers_message(&self) -> &str {
        &self.sticky_modifiers_message
    }

    /// Number of tracked devices, including those with empty messages
    pub fn device_count(&self) -> usize {
        self.device_messages.len()
    }

    /// Build the merged notification body.
    ///
    /// The first non-empty device message in ascending device order comes
    /// first, followed by the sticky modifiers message separated by a single
    /// newline.
    pub fn make_message(&self) -> String {
        let mut message = self
            .device_messages
            .values()
            .find(|m| !m.is_empty())
            .cloned()
            .unwrap_or_default();

        if !self.sticky_modifiers_message.is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&self.sticky_modifiers_message);
        }

        message
    }
}
