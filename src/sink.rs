//! Interfaces to the external consumers of the engine.
//!
//! The engine never renders anything itself: parsed entries go to an
//! [`EntrySink`] (a UI list, a channel, a test buffer) and human-readable
//! status text goes to a [`StatusReporter`].

use crate::entry::LogEntry;

/// Ordered, append-only consumer of parsed entries.
///
/// The engine only ever appends batches in arrival order or clears the whole
/// sink; it never reorders or removes individual entries. Implementations
/// must preserve call order.
pub trait EntrySink: Send + Sync {
    /// Append one ordered batch of entries.
    fn append(&self, entries: Vec<LogEntry>);

    /// Discard everything appended so far.
    fn clear(&self);
}

/// Receiver of human-readable status and error text.
///
/// Invoked once on session start (informational) and once on fatal error
/// (diagnostic). `summary` is a short one-liner, `details` the full text.
pub trait StatusReporter: Send + Sync {
    fn report(&self, summary: &str, details: &str);
}

/// Reporter that forwards status text to the `tracing` output.
///
/// Used by the CLI binary; GUI front ends supply their own implementation
/// bound to a status bar or similar.
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, summary: &str, details: &str) {
        tracing::info!("{summary}");
        tracing::debug!("{details}");
    }
}
