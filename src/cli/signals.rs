//! OS signal handling for the daemon

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::info;

use super::command::DaemonCommand;

/// Capacity of the daemon command channel
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Daemon signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for receiving daemon commands from other sources (e.g., socket server).
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonCommand>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender that can be used by other sources
    /// (like a socket server) to send commands to the daemon loop.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonCommand>), std::io::Error> {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            info!("received SIGINT, shutting down");
            let _ = tx_int.send(DaemonCommand::Shutdown).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            info!("received SIGTERM, shutting down");
            let _ = tx_term.send(DaemonCommand::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wrap an existing receiver (no OS signal hooks)
    pub fn from_receiver(receiver: mpsc::Receiver<DaemonCommand>) -> Self {
        Self { receiver }
    }

    /// Wait for the next command
    pub async fn recv(&mut self) -> Option<DaemonCommand> {
        self.receiver.recv().await
    }

    /// Refuse further commands. Already queued ones can still be received.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_commands_from_sender() {
        let (tx, rx) = mpsc::channel(4);
        let mut handler = DaemonSignalHandler::from_receiver(rx);

        tx.send(DaemonCommand::ClearSticky).await.unwrap();
        tx.send(DaemonCommand::Shutdown).await.unwrap();

        assert_eq!(handler.recv().await, Some(DaemonCommand::ClearSticky));
        assert_eq!(handler.recv().await, Some(DaemonCommand::Shutdown));
    }

    #[tokio::test]
    async fn close_rejects_new_commands_but_keeps_queued() {
        let (tx, rx) = mpsc::channel(4);
        let mut handler = DaemonSignalHandler::from_receiver(rx);

        tx.send(DaemonCommand::Status).await.unwrap();
        handler.close();

        assert!(tx.send(DaemonCommand::ClearSticky).await.is_err());
        assert_eq!(handler.recv().await, Some(DaemonCommand::Status));
        assert_eq!(handler.recv().await, None);
    }

    #[tokio::test]
    async fn closed_channel_yields_none() {
        let (tx, rx) = mpsc::channel::<DaemonCommand>(1);
        let mut handler = DaemonSignalHandler::from_receiver(rx);
        drop(tx);
        assert_eq!(handler.recv().await, None);
    }
}
