//! CSV dataset backend
//!
//! The dataset is a flat file with the header `url,price,timestamp`. Every
//! persist re-reads the whole file, appends the new rows and rewrites it.
//! The sequence is not atomic: a crash between read and write loses that
//! round, and concurrent writers race each other.

use crate::scrape::RoundResult;
use crate::storage::traits::{DatasetStore, PersistError, PersistResult};
use crate::storage::{PersistOutcome, PriceRecord, DATASET_HEADER};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Dataset stored as a CSV file
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetStore for CsvStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PersistResult<Vec<PriceRecord>> {
        load_dataset(&self.path)
    }

    fn persist(&self, round: &RoundResult) -> PersistResult<PersistOutcome> {
        persist_round(round, &self.path)
    }
}

/// Loads all rows from a CSV dataset
///
/// # Arguments
///
/// * `path` - Path to the dataset file
///
/// # Returns
///
/// * `Ok(Vec<PriceRecord>)` - Rows in file order; empty if the file is missing or empty
/// * `Err(PersistError)` - The file could not be read or has an unexpected layout
pub fn load_dataset(path: &Path) -> PersistResult<Vec<PriceRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    // A zero-byte file has no header row yet
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    if !headers.iter().eq(DATASET_HEADER) {
        return Err(PersistError::Malformed {
            path: path.display().to_string(),
            reason: format!(
                "expected columns {:?}, found {:?}",
                DATASET_HEADER,
                headers.iter().collect::<Vec<_>>()
            ),
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

/// Appends a round's observations to the dataset at `path`
///
/// Existing rows are kept in order and the new rows follow them, also in
/// order. The file is created if it does not exist. An empty round does not
/// touch the file at all.
///
/// # Arguments
///
/// * `round` - The observations collected by one round
/// * `path` - Path to the dataset file
///
/// # Returns
///
/// * `Ok(PersistOutcome)` - What was written
/// * `Err(PersistError)` - Reading the existing dataset or writing the merged one failed
pub fn persist_round(round: &RoundResult, path: &Path) -> PersistResult<PersistOutcome> {
    if round.is_empty() {
        return Ok(PersistOutcome::Skipped);
    }

    let mut records = load_dataset(path)?;
    let existing = records.len();
    records.extend(round.observations().iter().map(PriceRecord::from));

    write_dataset(path, &records)?;

    tracing::debug!(
        path = %path.display(),
        existing,
        appended = records.len() - existing,
        "Dataset written"
    );

    Ok(PersistOutcome::Appended {
        appended: records.len() - existing,
        total: records.len(),
    })
}

/// Overwrites the dataset with the header followed by `records`
fn write_dataset(path: &Path, records: &[PriceRecord]) -> PersistResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(DATASET_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
