//! Storage traits and error types
//!
//! This module defines the trait interface for dataset backends and
//! associated error types.

use crate::scrape::RoundResult;
use crate::storage::{PersistOutcome, PriceRecord};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing the dataset
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed dataset {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Result type for dataset operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Trait for dataset backends
///
/// A dataset is an append-only history of price observations. Backends
/// assume a single writer.
pub trait DatasetStore: Send + Sync {
    /// Location of the dataset, used in status lines
    fn path(&self) -> &Path;

    /// Loads every row of the dataset, oldest first
    ///
    /// A dataset that does not exist yet loads as empty.
    fn load(&self) -> PersistResult<Vec<PriceRecord>>;

    /// Appends the observations of a round after the existing rows
    ///
    /// An empty round leaves the dataset untouched and returns
    /// `PersistOutcome::Skipped`.
    fn persist(&self, round: &RoundResult) -> PersistResult<PersistOutcome>;
}
