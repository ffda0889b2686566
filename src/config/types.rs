use serde::Deserialize;
use std::num::NonZeroU32;

/// User agent sent with every request unless the configuration overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Dataset file written when the configuration does not name one
pub const DEFAULT_DATASET_PATH: &str = "scraped_prices.csv";

/// Main configuration structure for Price-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default, rename = "target")]
    pub targets: Vec<Target>,
}

/// Scheduling and request behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Minutes to wait between the end of one round and the start of the next
    #[serde(rename = "interval-minutes", default = "default_interval_minutes")]
    pub interval_minutes: NonZeroU32,

    /// Granularity of the sleep between rounds, in seconds
    #[serde(rename = "sleep-slice-secs", default = "default_sleep_slice_secs")]
    pub sleep_slice_secs: u64,

    /// Timeout for a single page request, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            sleep_slice_secs: default_sleep_slice_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV dataset
    #[serde(rename = "dataset-path", default = "default_dataset_path")]
    pub dataset_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
        }
    }
}

/// Additional target sources
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Text file with one `URL [selector]` per line, relative to the config file
    #[serde(rename = "targets-file")]
    pub targets_file: Option<String>,
}

/// A page to watch and the selector locating its price
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    pub url: String,

    /// CSS selector; the default selectors are tried when absent
    #[serde(default)]
    pub selector: Option<String>,
}

impl Target {
    pub fn new(url: impl Into<String>, selector: Option<&str>) -> Self {
        Self {
            url: url.into(),
            selector: selector.map(str::to_string),
        }
    }
}

fn default_interval_minutes() -> NonZeroU32 {
    NonZeroU32::new(60).unwrap_or(NonZeroU32::MIN)
}

fn default_sleep_slice_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_dataset_path() -> String {
    DEFAULT_DATASET_PATH.to_string()
}
