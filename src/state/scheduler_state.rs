/// Scheduler lifecycle states
///
/// A scheduler is `Running` from a successful `start` until its cycle task
/// observes the stop signal and returns. Everything else is `Idle`.
use std::fmt;

/// Represents the lifecycle state of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// No cycle task is alive; `start` will spawn one
    Idle,

    /// A cycle task is alive (possibly winding down after `stop`)
    Running,
}

impl SchedulerState {
    /// Returns true if a cycle task is alive
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
