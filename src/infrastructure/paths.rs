//! Well-known file locations

use std::path::PathBuf;

/// Directory name used under the platform state/config directories
pub const APP_DIR_NAME: &str = "notemux";

/// File name of the notification message document
pub const MESSAGE_FILE_NAME: &str = "notification_message.json";

/// Default location of the notification message file.
///
/// Prefers the XDG state directory, then the local data directory, then the
/// system temp directory.
pub fn default_message_file_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(MESSAGE_FILE_NAME)
}
