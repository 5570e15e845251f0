//! IPC (Inter-Process Communication) module for daemon control
//!
//! Unix domain sockets carry one request line and one response line per
//! connection.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;
use tokio::sync::mpsc;

use super::command::DaemonCommand;

/// Status reply function type for IPC servers
pub type StatusFn = Box<dyn Fn() -> String + Send + Sync>;

/// Trait for IPC servers that listen for daemon commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept and handle connections
    ///
    /// This runs in a loop, accepting connections and processing commands.
    /// Each valid command is sent to the provided channel.
    /// The status_fn is called to answer status queries.
    async fn run(&self, tx: mpsc::Sender<DaemonCommand>, status_fn: StatusFn) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the daemon
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a command and receive response
    async fn send_command(&self, cmd: &DaemonCommand) -> io::Result<String>;
}

/// Create the IPC server for the given socket
pub fn create_ipc_server(socket_path: SocketPath) -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(socket_path))
}

/// Create the IPC client for the given socket
pub fn create_ipc_client(socket_path: SocketPath) -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(socket_path))
}
