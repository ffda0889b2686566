//! Scheduler owning the scrape cycle lifecycle
//!
//! This module handles:
//! - Starting one background cycle task, and refusing a second while it lives
//! - Cooperative stopping through a cancellation token
//! - The cycle itself: round, persist, sleep in slices, repeat
//!
//! The stop signal is checked before each target, after each round and at
//! every sleep slice. An in-flight request is never aborted, so the longest
//! delay before a stop is honored is one request timeout.

use crate::config::{Config, Target};
use crate::output::LogSink;
use crate::scrape::{Fetcher, RoundResult, RoundRunner};
use crate::state::{BotState, SchedulerState};
use crate::storage::{CsvStore, DatasetStore, PersistOutcome};
use crate::RippleError;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Shortest sleep slice accepted; a zero slice would spin
const MIN_SLEEP_SLICE: Duration = Duration::from_millis(1);

/// Handles to the live cycle task
struct ActiveCycle {
    /// Raised by `stop`
    stop: CancellationToken,

    /// Raised by the task itself when it ends (also on panic)
    done: CancellationToken,

    /// Set by the first accepted `stop`
    stop_requested: bool,
}

impl ActiveCycle {
    fn is_alive(&self) -> bool {
        !self.done.is_cancelled()
    }
}

/// Scheduler runs scrape rounds at a fixed interval until stopped
///
/// The scheduler coordinates:
/// - The Idle/Running lifecycle (`start`, `stop`, `state`, `join`)
/// - Handing the bot state and stop signal to the cycle task
/// - Reporting every step through the status sink
pub struct Scheduler {
    runner: RoundRunner,
    store: Arc<dyn DatasetStore>,
    sink: Arc<dyn LogSink>,
    sleep_slice: Duration,
    cycle: Mutex<Option<ActiveCycle>>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Used for every target request
    /// * `store` - Dataset each round is persisted to
    /// * `sink` - Receives the human-readable status lines
    /// * `sleep_slice` - Granularity of the sleep between rounds
    pub fn new(
        fetcher: Fetcher,
        store: Arc<dyn DatasetStore>,
        sink: Arc<dyn LogSink>,
        sleep_slice: Duration,
    ) -> Self {
        Self {
            runner: RoundRunner::new(fetcher, Arc::clone(&sink)),
            store,
            sink,
            sleep_slice: sleep_slice.max(MIN_SLEEP_SLICE),
            cycle: Mutex::new(None),
        }
    }

    /// Creates a scheduler persisting to the configured CSV dataset
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - Ready to `start`
    /// * `Err(RippleError)` - The HTTP client could not be built
    pub fn from_config(config: &Config, sink: Arc<dyn LogSink>) -> Result<Self, RippleError> {
        let fetcher = Fetcher::from_config(&config.scraper)?;
        let store = Arc::new(CsvStore::new(&config.output.dataset_path));
        Ok(Self::new(
            fetcher,
            store,
            sink,
            Duration::from_secs(config.scraper.sleep_slice_secs),
        ))
    }

    /// Returns the current lifecycle state
    ///
    /// After `stop`, the scheduler stays `Running` until the cycle task has
    /// noticed the signal and finished.
    pub fn state(&self) -> SchedulerState {
        state_of(&self.lock_cycle())
    }

    /// Starts the scrape cycle on a background task
    ///
    /// Must be called from within a Tokio runtime. Returns immediately.
    ///
    /// # Arguments
    ///
    /// * `targets` - Targets scraped each round, in order
    /// * `interval_minutes` - Pause between rounds
    ///
    /// # Returns
    ///
    /// * `true` - A new cycle was started
    /// * `false` - A cycle is already running; nothing changed
    pub fn start(&self, targets: Vec<Target>, interval_minutes: NonZeroU32) -> bool {
        let mut slot = self.lock_cycle();

        let state = state_of(&slot);
        if state.is_running() {
            tracing::debug!(%state, "Start ignored, cycle already running");
            return false;
        }

        let stop = CancellationToken::new();
        let done = CancellationToken::new();
        let done_guard = done.clone().drop_guard();
        *slot = Some(ActiveCycle {
            stop: stop.clone(),
            done,
            stop_requested: false,
        });
        drop(slot);

        tracing::info!(
            targets = targets.len(),
            interval_minutes = interval_minutes.get(),
            state = %SchedulerState::Running,
            "Starting scrape cycle"
        );
        self.sink.emit("Bot started.");

        let cycle = Cycle {
            runner: self.runner.clone(),
            store: Arc::clone(&self.store),
            sink: Arc::clone(&self.sink),
            sleep_slice: self.sleep_slice,
            state: BotState::new(targets, interval_minutes),
            stop,
        };
        tokio::spawn(async move {
            let _done_guard = done_guard;
            cycle.run().await;
        });

        true
    }

    /// Asks the running cycle to wind down
    ///
    /// The cycle finishes the request in flight (if any), persists what the
    /// current round collected, and ends. Use `join` to wait for that.
    ///
    /// # Returns
    ///
    /// * `true` - The stop signal was raised
    /// * `false` - Nothing was running, or a stop is already pending
    pub fn stop(&self) -> bool {
        let stop = {
            let mut slot = self.lock_cycle();
            match slot.as_mut() {
                Some(active) if active.is_alive() && !active.stop_requested => {
                    active.stop_requested = true;
                    Some(active.stop.clone())
                }
                _ => None,
            }
        };

        let Some(stop) = stop else {
            tracing::debug!(state = %self.state(), "Stop ignored");
            return false;
        };

        // Announced before the signal so it precedes the task's final line
        self.sink.emit("Stopping bot...");
        stop.cancel();
        tracing::info!(state = %self.state(), "Stop requested");
        true
    }

    /// Waits until the current cycle task (if any) has ended
    pub async fn join(&self) {
        let done = self.lock_cycle().as_ref().map(|active| active.done.clone());
        if let Some(done) = done {
            done.cancelled().await;
        }
    }

    fn lock_cycle(&self) -> MutexGuard<'_, Option<ActiveCycle>> {
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn state_of(slot: &Option<ActiveCycle>) -> SchedulerState {
    match slot {
        Some(active) if active.is_alive() => SchedulerState::Running,
        _ => SchedulerState::Idle,
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(active) = self.lock_cycle().as_ref() {
            active.stop.cancel();
        }
    }
}

/// Everything the background task needs, moved into it at start
struct Cycle {
    runner: RoundRunner,
    store: Arc<dyn DatasetStore>,
    sink: Arc<dyn LogSink>,
    sleep_slice: Duration,
    state: BotState,
    stop: CancellationToken,
}

impl Cycle {
    async fn run(self) {
        while !self.stop.is_cancelled() {
            self.sink.emit("Starting scraping round...");
            let round = self.runner.run_round(&self.state.targets, &self.stop).await;

            self.persist(&round);

            if self.stop.is_cancelled() {
                break;
            }

            self.sink.emit(&format!(
                "Sleeping for {} minutes...",
                self.state.interval_minutes
            ));
            if !sleep_in_slices(self.state.interval(), self.sleep_slice, &self.stop).await {
                break;
            }
        }

        tracing::info!("Scrape cycle ended");
        self.sink.emit("Bot stopped.");
    }

    /// Persists a round, reporting the outcome; failures are not fatal
    fn persist(&self, round: &RoundResult) {
        let path = self.store.path().display();

        match self.store.persist(round) {
            Ok(PersistOutcome::Skipped) => {
                self.sink.emit("No data scraped this round.");
            }
            Ok(PersistOutcome::Appended { appended, total }) => {
                tracing::info!(%path, appended, total, "Round persisted");
                self.sink.emit(&format!("Data saved to {}", path));
            }
            Err(e) => {
                tracing::error!(%path, error = %e, "Failed to persist round");
                self.sink
                    .emit(&format!("Error saving data to {}: {}", path, e));
            }
        }
    }
}

/// Sleeps for `total`, one `slice` at a time, unless `stop` is raised
///
/// # Returns
///
/// * `true` - The full duration elapsed
/// * `false` - Stop was requested before it did
pub(crate) async fn sleep_in_slices(
    total: Duration,
    slice: Duration,
    stop: &CancellationToken,
) -> bool {
    let deadline = Instant::now() + total;

    loop {
        if stop.is_cancelled() {
            return false;
        }

        let now = Instant::now();
        if now >= deadline {
            return true;
        }

        let nap = slice.min(deadline - now);
        tokio::select! {
            () = tokio::time::sleep(nap) => {}
            () = stop.cancelled() => return false,
        }
    }
}
