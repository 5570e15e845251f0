//! CLI layer - Command-line interface
//!
//! Contains argument parsing, the daemon control protocol, output
//! formatting, signal handling, and the daemon runner.

pub mod app;
pub mod args;
pub mod command;
pub mod config_cmd;
pub mod control_cmd;
pub mod daemon_app;
pub mod ipc;
pub mod pid_file;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{init_logging, load_config, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, DeviceAction, StickyAction};
pub use command::{CommandParseError, DaemonCommand};
pub use control_cmd::{handle_control_command, handle_show_command};
pub use daemon_app::run_daemon;
pub use presenter::Presenter;
