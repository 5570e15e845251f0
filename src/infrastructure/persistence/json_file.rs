//! JSON file sink for the notification message

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::application::ports::{MessageSink, SinkError};
use crate::domain::message::NotificationDocument;

/// Writes the notification document as pretty-printed JSON.
///
/// The file is replaced atomically: content goes to a temp file in the
/// destination directory which is then renamed over the target, so readers
/// never see a partial document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileWriter;

impl JsonFileWriter {
    /// Create a new JSON file writer
    pub fn new() -> Self {
        Self
    }

    /// Read back a document written by this sink
    pub fn load(path: &Path) -> Result<NotificationDocument, SinkError> {
        let content = fs::read_to_string(path).map_err(|e| SinkError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| SinkError::Serialize(e.to_string()))
    }

    fn create_parent(parent: &Path, dir_mode: u32) -> Result<(), SinkError> {
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(dir_mode);
        }
        #[cfg(not(unix))]
        let _ = dir_mode;

        builder.create(parent).map_err(|e| SinkError::CreateDir {
            path: parent.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl MessageSink for JsonFileWriter {
    fn save(
        &self,
        document: &NotificationDocument,
        path: &Path,
        dir_mode: u32,
        file_mode: u32,
    ) -> Result<(), SinkError> {
        let write_err = |message: String| SinkError::WriteFailed {
            path: path.display().to_string(),
            message,
        };

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        Self::create_parent(parent, dir_mode)?;

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| SinkError::Serialize(e.to_string()))?;

        let dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| write_err(e.to_string()))?;
        temp.flush().map_err(|e| write_err(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(temp.path(), fs::Permissions::from_mode(file_mode))
                .map_err(|e| write_err(e.to_string()))?;
        }
        #[cfg(not(unix))]
        let _ = file_mode;

        temp.persist(path).map_err(|e| write_err(e.error.to_string()))?;

        Ok(())
    }
}
