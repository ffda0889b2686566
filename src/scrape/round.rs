//! A single scraping round
//!
//! A round visits every target once, in order. Failures are reported through
//! the status sink and skipped; they never end the round. The only early
//! exit is the stop signal, checked before each target.

use crate::config::Target;
use crate::output::LogSink;
use crate::scrape::{extract, Fetcher};
use crate::ScrapeError;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A price successfully read from a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub url: String,

    /// Text of the matched element, trimmed but otherwise as rendered
    pub price_text: String,

    /// Wall-clock time of the extraction
    pub timestamp: DateTime<Local>,
}

impl Observation {
    pub fn new(
        url: impl Into<String>,
        price_text: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            url: url.into(),
            price_text: price_text.into(),
            timestamp,
        }
    }
}

/// Observations gathered by one round, in target order
#[derive(Debug, Clone, Default)]
pub struct RoundResult {
    observations: Vec<Observation>,
    attempted: usize,
    failed: usize,
    stopped_early: bool,
}

impl RoundResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observation
    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Targets the round got to (successful or not)
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Targets that produced no observation
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// True if the stop signal cut the round short
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }
}

/// Runs rounds over a target list
#[derive(Clone)]
pub struct RoundRunner {
    fetcher: Fetcher,
    sink: Arc<dyn LogSink>,
}

impl RoundRunner {
    pub fn new(fetcher: Fetcher, sink: Arc<dyn LogSink>) -> Self {
        Self { fetcher, sink }
    }

    /// Scrapes every target once, in order
    ///
    /// # Arguments
    ///
    /// * `targets` - Targets to visit
    /// * `stop` - Checked before each target; when cancelled, the round ends
    ///   and whatever was collected so far is returned
    ///
    /// # Returns
    ///
    /// The observations of all targets that succeeded, in target order
    pub async fn run_round(&self, targets: &[Target], stop: &CancellationToken) -> RoundResult {
        let mut result = RoundResult::new();

        for target in targets {
            if stop.is_cancelled() {
                tracing::debug!(
                    remaining = targets.len() - result.attempted,
                    "Stop requested, ending round early"
                );
                result.stopped_early = true;
                break;
            }

            result.attempted += 1;
            self.sink.emit(&format!("Scraping {} ...", target.url));

            match self.scrape_target(target).await {
                Ok(price) => {
                    self.sink.emit(&format!("Price found: {}", price));
                    result.push(Observation::new(&target.url, price, Local::now()));
                }
                Err(e) => {
                    tracing::warn!(
                        url = %target.url,
                        selector = ?target.selector,
                        error = %e,
                        "Target failed"
                    );
                    self.sink
                        .emit(&format!("Error scraping {}: {}", target.url, e));
                    result.failed += 1;
                }
            }
        }

        tracing::info!(
            attempted = result.attempted,
            collected = result.len(),
            failed = result.failed,
            "Round finished"
        );

        result
    }

    /// Fetches one target and extracts its price
    async fn scrape_target(&self, target: &Target) -> Result<String, ScrapeError> {
        let document = self.fetcher.fetch(&target.url).await?;
        Ok(extract(&document, target.selector.as_deref())?)
    }
}
