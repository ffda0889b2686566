use crate::config::types::{Config, Target};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Targets listed under `[[target]]` come first, followed by the targets read
/// from `[input] targets-file` (if any), in file order.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use price_ripple::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Watching {} pages", config.targets.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let mut config: Config = toml::from_str(&content)?;

    // Append targets from the side file
    if let Some(file) = &config.input.targets_file {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let text = std::fs::read_to_string(base.join(file))?;
        config.targets.extend(parse_targets(&text));
    }

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Parses the combined text form of a target list
///
/// Each line holds a URL optionally followed by whitespace and a CSS
/// selector. The selector is the rest of the line, so it may contain spaces
/// (`div.product span.price`). Blank lines and lines starting with `#` are
/// skipped.
///
/// # Example
///
/// ```
/// use price_ripple::config::parse_targets;
///
/// let targets = parse_targets("https://example.com/a .price\n\nhttps://example.com/b\n");
/// assert_eq!(targets.len(), 2);
/// assert_eq!(targets[0].selector.as_deref(), Some(".price"));
/// assert_eq!(targets[1].selector, None);
/// ```
pub fn parse_targets(text: &str) -> Vec<Target> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((url, rest)) => {
                let selector = rest.trim();
                Target::new(url, (!selector.is_empty()).then_some(selector))
            }
            None => Target::new(line, None),
        })
        .collect()
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so that dataset rows can be traced back to the
/// configuration that produced them.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
