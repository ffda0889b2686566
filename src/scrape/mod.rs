//! Scrape module for fetching pages and recording prices
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a browser-like user agent
//! - Price extraction with selector fallbacks
//! - Rounds over the target list with per-target failure isolation
//! - The scheduler driving rounds at a fixed interval

mod extractor;
mod fetcher;
mod round;
mod scheduler;

pub use extractor::{extract, Document, DEFAULT_SELECTORS};
pub use fetcher::{build_http_client, Fetcher};
pub use round::{Observation, RoundResult, RoundRunner};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::output::LogSink;
use crate::storage::{CsvStore, DatasetStore, PersistOutcome};
use crate::RippleError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a single round over the configured targets and persists it
///
/// This is the one-shot counterpart of `Scheduler`: no loop, no sleep.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `sink` - Receives the status lines of the round
///
/// # Returns
///
/// * `Ok(PersistOutcome)` - What was written to the dataset
/// * `Err(RippleError)` - The HTTP client could not be built or the dataset could not be written
///
/// # Example
///
/// ```no_run
/// use price_ripple::config::load_config;
/// use price_ripple::scrape::scrape_once;
/// use price_ripple::TracingSink;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// scrape_once(&config, Arc::new(TracingSink)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn scrape_once(
    config: &Config,
    sink: Arc<dyn LogSink>,
) -> Result<PersistOutcome, RippleError> {
    let fetcher = Fetcher::from_config(&config.scraper)?;
    let runner = RoundRunner::new(fetcher, Arc::clone(&sink));
    let store = CsvStore::new(&config.output.dataset_path);

    let round = runner
        .run_round(&config.targets, &CancellationToken::new())
        .await;
    let outcome = store.persist(&round)?;

    match outcome {
        PersistOutcome::Skipped => sink.emit("No data scraped this round."),
        PersistOutcome::Appended { .. } => {
            sink.emit(&format!("Data saved to {}", store.path().display()))
        }
    }

    Ok(outcome)
}
