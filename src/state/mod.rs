//! State module for the scheduler lifecycle
//!
//! # Components
//!
//! - `SchedulerState`: Whether a cycle is currently alive (idle, running)
//! - `BotState`: The targets and interval a running cycle works on

mod bot_state;
mod scheduler_state;

// Re-export main types
pub use bot_state::BotState;
pub use scheduler_state::SchedulerState;
