use crate::config::types::{Config, FetcherConfig, RelayEntry, URL_PLACEHOLDER};
use crate::url::build_relay_url;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_relays(&config.relays)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if let Some(timeout) = config.timeout_secs {
        if !(1..=600).contains(&timeout) {
            return Err(ConfigError::Validation(format!(
                "timeout_secs must be between 1 and 600, got {}",
                timeout
            )));
        }
    }

    Ok(())
}

/// Validates relay entries
///
/// Each template must contain the `{url}` placeholder exactly once and must
/// expand to an absolute http(s) URL.
fn validate_relays(relays: &[RelayEntry]) -> Result<(), ConfigError> {
    let sample = Url::parse("https://example.com/listing?page=1")
        .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

    for relay in relays {
        if relay.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "relay name cannot be empty".to_string(),
            ));
        }

        let placeholders = relay.template.matches(URL_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(ConfigError::Validation(format!(
                "relay '{}' template must contain {} exactly once, found {}",
                relay.name, URL_PLACEHOLDER, placeholders
            )));
        }

        build_relay_url(&relay.template, &sample).map_err(|e| {
            ConfigError::InvalidUrl(format!("relay '{}' template: {}", relay.name, e))
        })?;
    }

    Ok(())
}
