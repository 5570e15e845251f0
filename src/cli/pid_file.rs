//! PID file management for daemon mode

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::kill;
use nix::unistd::Pid;
use tracing::debug;

const PID_FILE_NAME: &str = "notemux.pid";

/// PID file for daemon mode
pub struct PidFile {
    path: PathBuf,
    /// Set once this process wrote the file; only then is it removed
    owned: AtomicBool,
}

impl PidFile {
    /// Create a PID file manager next to the control socket
    /// (XDG_RUNTIME_DIR, or the temp dir)
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(PID_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(PID_FILE_NAME));
        Self::with_path(path)
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: AtomicBool::new(false),
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if another daemon is already running
    pub fn is_running(&self) -> Option<u32> {
        if !self.path.exists() {
            return None;
        }

        let mut file = File::open(&self.path).ok()?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).ok()?;
        let pid: u32 = contents.trim().parse().ok()?;

        // Signal 0 checks the process exists without delivering anything
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => Some(pid),
            Err(nix::errno::Errno::ESRCH) => {
                debug!(pid, path = %self.path.display(), "removing stale PID file");
                let _ = fs::remove_file(&self.path);
                None
            }
            // EPERM: the process exists but belongs to someone else
            Err(nix::errno::Errno::EPERM) => Some(pid),
            Err(_) => None,
        }
    }

    /// Acquire the PID file (fails if another daemon is running)
    pub fn acquire(&self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;

        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.owned.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Release the PID file. Does nothing unless `acquire` succeeded.
    pub fn release(&self) -> Result<(), PidFileError> {
        if self.owned.swap(false, Ordering::SeqCst) && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.release();
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another daemon is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}
