//! Output module for status reporting and dataset summaries
//!
//! This module handles:
//! - Delivering human-readable status lines to a caller-chosen sink
//! - Summarizing the recorded dataset per URL

mod sink;
pub mod stats;

pub use sink::{ChannelSink, LogSink, TracingSink};
pub use stats::{load_statistics, print_statistics, summarize, DatasetStatistics, TargetStatistics};
