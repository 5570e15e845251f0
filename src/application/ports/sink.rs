//! Message sink port interface

use std::path::Path;

use thiserror::Error;

use crate::domain::message::NotificationDocument;

/// Message sink errors
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("Failed to serialize notification document: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

/// Port for persisting the notification document.
///
/// Called from the dispatcher worker thread, so implementations must not
/// block indefinitely.
pub trait MessageSink: Send + Sync {
    /// Write `document` to `path`.
    ///
    /// # Arguments
    /// * `document` - The notification document
    /// * `path` - Destination file
    /// * `dir_mode` - Permission bits for created parent directories
    /// * `file_mode` - Permission bits for the written file
    fn save(
        &self,
        document: &NotificationDocument,
        path: &Path,
        dir_mode: u32,
        file_mode: u32,
    ) -> Result<(), SinkError>;
}

/// Blanket implementation for boxed sink types
impl MessageSink for Box<dyn MessageSink> {
    fn save(
        &self,
        document: &NotificationDocument,
        path: &Path,
        dir_mode: u32,
        file_mode: u32,
    ) -> Result<(), SinkError> {
        self.as_ref().save(document, path, dir_mode, file_mode)
    }
}
