//! Channel-backed sink adapter exposing entries as an async stream.
//!
//! [`ChannelSink`] implements [`EntrySink`] over an unbounded channel and
//! [`EntryStream`] yields the resulting events, so a consumer can drive the
//! engine with ordinary `StreamExt` combinators.

use crate::entry::LogEntry;
use crate::sink::EntrySink;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// One sink operation, in the order the engine performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// An ordered batch of entries from a single follow pass.
    Batch(Vec<LogEntry>),
    /// The sink was cleared (session restart or truncate).
    Clear,
}

/// Create a connected sink/stream pair.
pub fn entry_channel() -> (ChannelSink, EntryStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink { tx }, EntryStream { receiver: rx })
}

/// [`EntrySink`] implementation that forwards every operation over a channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
}

impl EntrySink for ChannelSink {
    fn append(&self, entries: Vec<LogEntry>) {
        // A dropped consumer is not an error; the session controller is the
        // one that decides when to stop the worker.
        let _ = self.tx.send(SinkEvent::Batch(entries));
    }

    fn clear(&self) {
        let _ = self.tx.send(SinkEvent::Clear);
    }
}

/// Async stream of [`SinkEvent`]s produced by the paired [`ChannelSink`].
pub struct EntryStream {
    receiver: mpsc::UnboundedReceiver<SinkEvent>,
}

impl EntryStream {
    /// Check if the stream has been closed/dropped
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Stream for EntryStream {
    type Item = SinkEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
