//! A follow engine for JSON-line log files.
//!
//! This library tails a single append-only file containing one JSON object
//! per line, incrementally parses newly appended lines, tolerates file
//! truncation, and delivers the parsed entries as ordered batches to a
//! pluggable sink — while staying cancellable and resource-safe under
//! repeated start/stop cycles.
//!
//! # Example
//!
//! ```rust,no_run
//! use json_log_follow::{follow, FollowConfig, SinkEvent};
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (mut controller, mut events) = follow("app.log", FollowConfig::default()).await;
//!
//!     while let Some(event) = events.next().await {
//!         match event {
//!             SinkEvent::Batch(entries) => {
//!                 for entry in entries {
//!                     println!("{} {}", entry.sequence, entry.summary);
//!                 }
//!             }
//!             SinkEvent::Clear => println!("(list cleared)"),
//!         }
//!     }
//!
//!     controller.stop().await;
//! }
//! ```

// Internal modules - not part of public API
mod entry;
mod error;
mod reader;
mod session;
mod sink;
mod stream;
mod worker;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use entry::{LogEntry, parse_line};
pub use error::{Error, Result};
pub use session::SessionController;
pub use sink::{EntrySink, StatusReporter, TracingReporter};
pub use stream::{ChannelSink, EntryStream, SinkEvent, entry_channel};
pub use worker::FollowConfig;

use std::path::Path;
use std::sync::Arc;

/// Start following a file, returning the controller and an event stream.
///
/// Convenience constructor wiring a [`SessionController`] to a channel-backed
/// sink; status text goes to `tracing`. The first event is always
/// [`SinkEvent::Clear`] from the session start. Front ends that bind their
/// own sink or status surface should build a [`SessionController`] directly.
pub async fn follow<P: AsRef<Path>>(
    path: P,
    config: FollowConfig,
) -> (SessionController, EntryStream) {
    let (sink, events) = entry_channel();
    let mut controller =
        SessionController::with_config(Arc::new(sink), Arc::new(TracingReporter), config);
    controller.start(path.as_ref()).await;
    (controller, events)
}
