//! Control command handler - sends commands to the running daemon via IPC

use crate::domain::config::AppConfig;
use crate::infrastructure::JsonFileWriter;

use super::app::{resolve_message_file, resolve_socket_path};
use super::args::{DeviceAction, StickyAction};
use super::command::DaemonCommand;
use super::ipc::{create_ipc_client, IpcClient};
use super::presenter::Presenter;

impl From<DeviceAction> for DaemonCommand {
    fn from(action: DeviceAction) -> Self {
        match action {
            DeviceAction::Set { id, message } => Self::SetDeviceMessage {
                device: id,
                message,
            },
            DeviceAction::Erase { id } => Self::EraseDevice { device: id },
        }
    }
}

impl From<StickyAction> for DaemonCommand {
    fn from(action: StickyAction) -> Self {
        match action {
            StickyAction::Set { flags } => Self::LatchSticky { flags },
            StickyAction::Release { flags } => Self::ReleaseSticky { flags },
            StickyAction::Clear => Self::ClearSticky,
        }
    }
}

/// Send a command to the daemon at the configured socket
pub async fn handle_control_command(
    command: DaemonCommand,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), String> {
    let client = create_ipc_client(resolve_socket_path(config));
    send_to_daemon(client.as_ref(), command, presenter).await
}

async fn send_to_daemon(
    client: &dyn IpcClient,
    command: DaemonCommand,
    presenter: &Presenter,
) -> Result<(), String> {
    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: notemux serve".to_string());
    }

    let response = client
        .send_command(&command)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;
    let response = response.trim();

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    match command {
        DaemonCommand::Status => presenter.daemon_status(response),
        DaemonCommand::Shutdown => presenter.info("Shutdown requested"),
        _ => presenter.info(&format!("Command sent: {}", command)),
    }

    Ok(())
}

/// Print the body of the notification message file
pub fn handle_show_command(config: &AppConfig, presenter: &Presenter) -> Result<(), String> {
    let path = resolve_message_file(config);
    let document = JsonFileWriter::load(&path).map_err(|e| e.to_string())?;

    if document.body.is_empty() {
        presenter.info("No active notification");
    } else {
        presenter.output_inline(&document.body);
        if !document.body.ends_with('\n') {
            presenter.output("");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::DeviceId;
    use crate::domain::modifier::ModifierFlag;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;

    struct MockClient {
        running: bool,
        reply: String,
        sent: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn new(running: bool, reply: &str) -> Self {
            Self {
                running,
                reply: reply.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IpcClient for MockClient {
        fn is_daemon_running(&self) -> bool {
            self.running
        }

        async fn send_command(&self, cmd: &DaemonCommand) -> io::Result<String> {
            self.sent.lock().unwrap().push(cmd.to_string());
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn device_action_maps_to_command() {
        let cmd = DaemonCommand::from(DeviceAction::Set {
            id: DeviceId::new(2),
            message: "hi".to_string(),
        });
        assert_eq!(cmd.to_string(), r#"device set 2 "hi""#);
        let cmd = DaemonCommand::from(DeviceAction::Erase { id: DeviceId::new(2) });
        assert_eq!(cmd.to_string(), "device erase 2");
    }

    #[test]
    fn sticky_action_maps_to_command() {
        let cmd = DaemonCommand::from(StickyAction::Set {
            flags: vec![ModifierFlag::RightCommand],
        });
        assert_eq!(cmd.to_string(), "sticky set right_command");
        assert_eq!(
            DaemonCommand::from(StickyAction::Clear),
            DaemonCommand::ClearSticky
        );
    }

    #[tokio::test]
    async fn not_running_is_an_error() {
        let client = MockClient::new(false, "ok\n");
        let err = send_to_daemon(&client, DaemonCommand::Status, &Presenter::new())
            .await
            .unwrap_err();
        assert!(err.contains("No daemon running"));
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_encoded_line() {
        let client = MockClient::new(true, "ok\n");
        send_to_daemon(&client, DaemonCommand::ClearSticky, &Presenter::new())
            .await
            .unwrap();
        assert_eq!(*client.sent.lock().unwrap(), vec!["sticky clear".to_string()]);
    }

    #[tokio::test]
    async fn daemon_error_reply_is_returned() {
        let client = MockClient::new(true, "error: unknown command: foo\n");
        let err = send_to_daemon(&client, DaemonCommand::Status, &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, "unknown command: foo");
    }
}
