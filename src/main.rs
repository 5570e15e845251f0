//! notemux CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notemux::cli::{
    config_cmd::handle_config_command, handle_control_command, handle_show_command,
    init_logging, load_config, run_daemon, Cli, Commands, DaemonCommand, Presenter, EXIT_ERROR,
};
use notemux::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let config = load_config(&cli).await;
    init_logging(&config);

    let result = match cli.command {
        Commands::Serve => return run_daemon(&config).await,
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            handle_config_command(action, &store, &presenter)
                .await
                .map_err(|e| e.to_string())
        }
        Commands::Device { action } => {
            handle_control_command(action.into(), &config, &presenter).await
        }
        Commands::Sticky { action } => {
            handle_control_command(action.into(), &config, &presenter).await
        }
        Commands::Status => handle_control_command(DaemonCommand::Status, &config, &presenter).await,
        Commands::Stop => handle_control_command(DaemonCommand::Shutdown, &config, &presenter).await,
        Commands::Show => handle_show_command(&config, &presenter),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
