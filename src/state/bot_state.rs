use crate::config::Target;
use std::num::NonZeroU32;
use std::time::Duration;

/// What a running scheduler works on
///
/// Captured once by `Scheduler::start` and handed to the cycle task, which
/// only reads it. The running flag lives next to it as a cancellation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotState {
    /// Targets scraped each round, in order
    pub targets: Vec<Target>,

    /// Pause between rounds, in minutes
    pub interval_minutes: NonZeroU32,
}

impl BotState {
    pub fn new(targets: Vec<Target>, interval_minutes: NonZeroU32) -> Self {
        Self {
            targets,
            interval_minutes,
        }
    }

    /// Returns the pause between rounds
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_minutes.get()) * 60)
    }
}
