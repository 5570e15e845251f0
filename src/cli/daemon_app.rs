//! Daemon app runner

use std::process::ExitCode;

use tracing::{debug, info};

use crate::application::ports::MessageSink;
use crate::application::NotificationMessageManager;
use crate::domain::config::AppConfig;
use crate::infrastructure::{JsonFileWriter, StickyModifierRegistry};

use super::app::{resolve_message_file, resolve_socket_path, EXIT_ERROR, EXIT_SUCCESS};
use super::command::DaemonCommand;
use super::ipc::create_ipc_server;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::DaemonSignalHandler;

/// Run daemon mode
pub async fn run_daemon(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let message_file = resolve_message_file(config);
    let mut manager = match NotificationMessageManager::new(JsonFileWriter::new(), &message_file)
    {
        Ok(m) => m,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let registry = StickyModifierRegistry::new();

    // Setup signal handler (returns handler + sender for socket server)
    let (mut signals, command_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let socket_path = resolve_socket_path(config);
    let mut server = create_ipc_server(socket_path.clone());
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let status = format!("running (message file: {})", message_file.display());
    tokio::spawn(async move {
        let _ = server
            .run(command_tx, Box::new(move || status.clone()))
            .await;
    });

    info!(
        pid = std::process::id(),
        socket = %socket_path.path().display(),
        message_file = %message_file.display(),
        "daemon started"
    );
    presenter.daemon_status("Started, waiting for commands...");

    let result = daemon_loop(&manager, &registry, &mut signals).await;

    // Write out everything queued before exiting
    manager.shutdown();
    let _ = pid_file.release();
    presenter.daemon_status("Stopped");

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Process commands until shutdown.
///
/// On shutdown the channel is closed, so later senders get an error, and
/// commands that were already accepted are still applied.
/// Returns true on a requested shutdown, false if the command channel closed.
async fn daemon_loop<K: MessageSink + 'static>(
    manager: &NotificationMessageManager<K>,
    registry: &StickyModifierRegistry,
    signals: &mut DaemonSignalHandler,
) -> bool {
    while let Some(command) = signals.recv().await {
        if !apply_command(manager, registry, command) {
            signals.close();
            while let Some(command) = signals.recv().await {
                apply_command(manager, registry, command);
            }
            return true;
        }
    }
    false
}

/// Apply one command to the manager. Returns false for shutdown.
pub fn apply_command<K: MessageSink + 'static>(
    manager: &NotificationMessageManager<K>,
    registry: &StickyModifierRegistry,
    command: DaemonCommand,
) -> bool {
    debug!(command = %command, "applying command");
    match command {
        DaemonCommand::SetDeviceMessage { device, message } => {
            manager.async_set_device_message(device, message);
        }
        DaemonCommand::EraseDevice { device } => {
            manager.async_erase_device(device);
        }
        DaemonCommand::LatchSticky { flags } => {
            registry.latch(&flags);
            manager.async_update_sticky_modifiers_message(registry);
        }
        DaemonCommand::ReleaseSticky { flags } => {
            registry.release(&flags);
            manager.async_update_sticky_modifiers_message(registry);
        }
        DaemonCommand::ClearSticky => {
            registry.clear();
            manager.async_clear_sticky_modifiers_message();
        }
        DaemonCommand::Status => {}
        DaemonCommand::Shutdown => {
            info!("shutdown requested");
            return false;
        }
    }
    true
}
