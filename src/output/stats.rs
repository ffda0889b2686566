//! Statistics generation from the price dataset
//!
//! This module provides functionality for summarizing and displaying what
//! the dataset holds for each watched URL.

use crate::storage::{load_dataset, PersistResult, PriceRecord};
use std::collections::HashMap;
use std::path::Path;

/// Per-URL dataset summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatistics {
    pub url: String,

    /// Number of rows recorded for this URL
    pub observations: usize,

    /// Price text of the most recent row (last in file order)
    pub latest_price: String,

    /// Earliest and latest timestamps seen
    pub first_seen: String,
    pub last_seen: String,
}

/// Dataset statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStatistics {
    /// Total number of rows
    pub total_rows: usize,

    /// One entry per URL, in order of first appearance
    pub targets: Vec<TargetStatistics>,
}

/// Loads the dataset at `path` and summarizes it
///
/// # Arguments
///
/// * `path` - Path to the dataset file
///
/// # Returns
///
/// * `Ok(DatasetStatistics)` - Summary (empty if the dataset does not exist)
/// * `Err(PersistError)` - The dataset could not be read
pub fn load_statistics(path: &Path) -> PersistResult<DatasetStatistics> {
    Ok(summarize(&load_dataset(path)?))
}

/// Summarizes a list of dataset rows
pub fn summarize(records: &[PriceRecord]) -> DatasetStatistics {
    let mut targets: Vec<TargetStatistics> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.url.as_str()) {
            Some(&i) => {
                let entry = &mut targets[i];
                entry.observations += 1;
                entry.latest_price = record.price.clone();
                if record.timestamp < entry.first_seen {
                    entry.first_seen = record.timestamp.clone();
                }
                if record.timestamp > entry.last_seen {
                    entry.last_seen = record.timestamp.clone();
                }
            }
            None => {
                index.insert(&record.url, targets.len());
                targets.push(TargetStatistics {
                    url: record.url.clone(),
                    observations: 1,
                    latest_price: record.price.clone(),
                    first_seen: record.timestamp.clone(),
                    last_seen: record.timestamp.clone(),
                });
            }
        }
    }

    DatasetStatistics {
        total_rows: records.len(),
        targets,
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &DatasetStatistics) {
    println!("=== Price Dataset Statistics ===\n");

    println!("Overview:");
    println!("  Total observations: {}", stats.total_rows);
    println!("  Distinct URLs: {}", stats.targets.len());
    println!();

    if stats.targets.is_empty() {
        println!("No observations recorded yet.");
        return;
    }

    println!("Per URL:");
    for target in &stats.targets {
        println!("  {}", target.url);
        println!("    Observations: {}", target.observations);
        println!("    Latest price: {}", target.latest_price);
        println!("    First seen:   {}", target.first_seen);
        println!("    Last seen:    {}", target.last_seen);
    }
}
