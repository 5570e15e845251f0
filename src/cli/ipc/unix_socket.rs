//! Unix Domain Socket communication for daemon control

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{IpcClient, IpcServer, StatusFn};
use crate::cli::command::DaemonCommand;

const SOCKET_FILE_NAME: &str = "notemux.sock";

/// Longest accepted request line, newline included
pub const MAX_REQUEST_LINE_BYTES: u64 = 64 * 1024;

/// How long a client may take to send its request line
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(SOCKET_FILE_NAME));
        Self { path }
    }

    /// Use an explicit socket path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for daemon commands
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
    request_timeout: Duration,
}

impl UnixSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the request read timeout
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, tx: mpsc::Sender<DaemonCommand>, status_fn: StatusFn) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    let status = status_fn();
                    let request_timeout = self.request_timeout;
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx, status, request_timeout).await
                        {
                            warn!(error = %e, "socket connection error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "socket accept error");
                }
            }
        }
    }

    fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    tx: mpsc::Sender<DaemonCommand>,
    status: String,
    request_timeout: Duration,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader).take(MAX_REQUEST_LINE_BYTES + 1);
    let mut line = String::new();

    timeout(request_timeout, reader.read_line(&mut line))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "no request received"))??;

    let response = if line.len() as u64 > MAX_REQUEST_LINE_BYTES {
        format!("error: request exceeds {} bytes", MAX_REQUEST_LINE_BYTES)
    } else {
        dispatch_line(&line, &tx, status).await
    };

    writer.write_all(format!("{}\n", response).as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}

/// Parse a request line and forward it, returning the reply line
async fn dispatch_line(line: &str, tx: &mpsc::Sender<DaemonCommand>, status: String) -> String {
    match DaemonCommand::parse(line) {
        Ok(DaemonCommand::Status) => status,
        Ok(cmd) => {
            debug!(command = %cmd, "control command received");
            match tx.send(cmd).await {
                Ok(()) => "ok".to_string(),
                Err(_) => "error: daemon is shutting down".to_string(),
            }
        }
        Err(e) => format!("error: {}", e),
    }
}

/// Unix Domain Socket client for sending commands to daemon
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send_command(&self, cmd: &DaemonCommand) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}
