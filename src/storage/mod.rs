//! Storage module for persisting price observations
//!
//! This module handles the dataset file, including:
//! - Loading the existing history (a missing file is an empty history)
//! - Appending each round's observations after the existing rows
//! - The on-disk row layout and timestamp format

mod csv_store;
mod traits;

pub use csv_store::{load_dataset, persist_round, CsvStore};
pub use traits::{DatasetStore, PersistError, PersistResult};

use crate::scrape::Observation;
use serde::{Deserialize, Serialize};

/// Column order of the dataset file
pub const DATASET_HEADER: [&str; 3] = ["url", "price", "timestamp"];

/// Format of the `timestamp` column (local time, sorts lexicographically)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One row of the dataset
///
/// Timestamps stay strings so that rows written by earlier runs are carried
/// forward exactly as they were read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub url: String,
    pub price: String,
    pub timestamp: String,
}

impl From<&Observation> for PriceRecord {
    fn from(obs: &Observation) -> Self {
        Self {
            url: obs.url.clone(),
            price: obs.price_text.clone(),
            timestamp: obs.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Result of persisting one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The round was empty; the dataset was not touched
    Skipped,

    /// Rows were appended
    Appended {
        /// Rows added by this round
        appended: usize,
        /// Rows in the dataset after the write
        total: usize,
    },
}
