//! Price-Ripple: a periodic price watcher
//!
//! This crate fetches a configured set of pages on a fixed cadence, extracts a
//! price-like text value from each one with a CSS selector (or a list of
//! default selectors), and appends every observation to a CSV dataset that
//! survives restarts.

pub mod config;
pub mod output;
pub mod scrape;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Price-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Persist(#[from] storage::PersistError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a target page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors raised while extracting a value from a fetched page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Price element not found with selector '{0}'")]
    NotFound(String),

    #[error("Price element not found with default selectors")]
    NoDefaultMatch,

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Failure of a single target within a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

// Re-export commonly used types
pub use config::{parse_targets, Config, Target};
pub use output::{ChannelSink, LogSink, TracingSink};
pub use scrape::{extract, Document, Fetcher, Observation, RoundResult, RoundRunner, Scheduler};
pub use state::{BotState, SchedulerState};
pub use storage::{CsvStore, DatasetStore, PersistOutcome, PriceRecord};
