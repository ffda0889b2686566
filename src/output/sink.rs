//! Status line sinks
//!
//! The scheduler reports progress as plain, human-readable lines ("Scraping
//! ... ", "Price found: ..."). Where those lines end up is decided by the
//! caller through the `LogSink` capability.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Receiver of human-readable status lines
///
/// Implementations must return promptly; `emit` is called from inside the
/// scrape cycle.
pub trait LogSink: Send + Sync {
    fn emit(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message)
    }
}

/// Sink that turns status lines into `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Sink that forwards status lines over an unbounded channel
///
/// Sending never blocks. Lines emitted after the receiver is dropped are
/// discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<String>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its lines are delivered to
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl LogSink for ChannelSink {
    fn emit(&self, message: &str) {
        let _ = self.sender.send(message.to_string());
    }
}
