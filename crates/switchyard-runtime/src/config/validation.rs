//! Configuration validation utilities.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{ControllersConfig, LogOutput, LoggingConfig, SwitchyardConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &SwitchyardConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_controllers_config(&config.controllers)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if let Some(target) = logging.filters.keys().find(|t| t.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "Log filter target cannot be blank: {target:?}"
        )));
    }

    Ok(())
}

fn validate_controllers_config(controllers: &ControllersConfig) -> ConfigResult<()> {
    for name in controllers.enabled.iter().chain(&controllers.disabled) {
        if name.trim().is_empty() {
            return Err(ConfigError::validation("Controller names cannot be empty"));
        }
    }

    let enabled: HashSet<&str> = controllers.enabled.iter().map(String::as_str).collect();
    if let Some(name) = controllers
        .disabled
        .iter()
        .find(|name| enabled.contains(name.as_str()))
    {
        return Err(ConfigError::ConflictingController(name.clone()));
    }

    Ok(())
}
