use crate::config::types::{Config, OutputConfig, ScraperConfig, Target};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates scheduling and request settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    // interval_minutes is NonZeroU32, so serde already rejected 0

    if config.sleep_slice_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "sleep_slice_secs must be >= 1, got {}",
            config.sleep_slice_secs
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dataset_path.is_empty() {
        return Err(ConfigError::Validation(
            "dataset_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target list
///
/// Selectors are only checked for emptiness here. A selector that is not
/// valid CSS fails its target at extraction time, every round.
fn validate_targets(targets: &[Target]) -> Result<(), ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::Validation(
            "at least one target is required".to_string(),
        ));
    }

    for target in targets {
        validate_target_url(&target.url)?;

        if let Some(selector) = &target.selector {
            if selector.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Target '{}' has an empty selector",
                    target.url
                )));
            }
        }
    }

    Ok(())
}

/// Validates that a target URL is absolute and uses HTTP(S)
fn validate_target_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Target URL '{}' must use http or https",
            raw
        )));
    }

    Ok(())
}
