use crate::config::types::{Config, HttpConfig, InputConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
///
/// Also called by the binary after command-line overrides are applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_input_config(&config.input)?;
    validate_output_config(&config.output, &config.input)?;
    validate_http_config(&config.http)?;
    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seeds_path.is_empty() {
        return Err(ConfigError::Validation(
            "seeds_path cannot be empty".to_string(),
        ));
    }

    if config.ignore_path.is_empty() {
        return Err(ConfigError::Validation(
            "ignore_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(output: &OutputConfig, input: &InputConfig) -> Result<(), ConfigError> {
    if output.links_path.is_empty() {
        return Err(ConfigError::Validation(
            "links_path cannot be empty".to_string(),
        ));
    }

    // The output file is overwritten after every page
    if output.links_path == input.seeds_path || output.links_path == input.ignore_path {
        return Err(ConfigError::Validation(format!(
            "links_path '{}' must differ from the input lists",
            output.links_path
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank when set".to_string(),
            ));
        }

        if user_agent.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "user_agent must not contain control characters, got {:?}",
                user_agent
            )));
        }
    }

    Ok(())
}
