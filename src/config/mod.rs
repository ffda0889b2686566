//! Configuration module for Price-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and parsing the plain-text target list format.
//!
//! # Example
//!
//! ```no_run
//! use price_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraping every {} minutes", config.scraper.interval_minutes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, InputConfig, OutputConfig, ScraperConfig, Target, DEFAULT_DATASET_PATH,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_targets};
