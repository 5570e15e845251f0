//! Config command handler

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "message_file" => config.message_file = Some(PathBuf::from(value)),
        "socket_path" => config.socket_path = Some(PathBuf::from(value)),
        "log_level" => config.log_level = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "message_file" => config.message_file.map(|p| p.display().to_string()),
        "socket_path" => config.socket_path.map(|p| p.display().to_string()),
        "log_level" => config.log_level,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.info(&format!("{} is not set", key)),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let show = |value: Option<String>| value.unwrap_or_else(|| "(not set)".to_string());

    presenter.key_value(
        "message_file",
        &show(config.message_file.map(|p| p.display().to_string())),
    );
    presenter.key_value(
        "socket_path",
        &show(config.socket_path.map(|p| p.display().to_string())),
    );
    presenter.key_value("log_level", &show(config.log_level));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Validate a config value for the given key
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "message_file" | "socket_path" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| ConfigError::ValidationError {
                key: key.to_string(),
                message: format!("Invalid log filter: {}", e),
            })?;
        }
        _ => {}
    }
    Ok(())
}
