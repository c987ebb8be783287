//! The follow worker: poll loop, backoff policy, batch delivery.

use crate::entry::{LogEntry, parse_line};
use crate::reader::read_new_lines;
use crate::sink::{EntrySink, StatusReporter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Poll timing policy for a follow session.
///
/// The wait between passes starts at `base_delay`, grows by `base_delay` per
/// idle pass up to `max_delay`, and snaps back to `base_delay` as soon as a
/// pass delivers entries.
#[derive(Debug, Clone, Copy)]
pub struct FollowConfig {
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(5000),
        }
    }
}

/// Next wait interval after a pass.
///
/// The delay resets only when entries were actually delivered, not merely
/// when the file grew: all-blank appends keep backing off.
fn next_delay(delivered: bool, current: Duration, config: &FollowConfig) -> Duration {
    if delivered {
        config.base_delay
    } else {
        (current + config.base_delay).min(config.max_delay)
    }
}

/// Run one follow session until cancelled or failed.
///
/// Opens the file fresh on every pass (open, read to EOF, close, wait), so
/// no handle is held across a wait interval. Entries from one pass are
/// delivered to the sink as a single ordered batch. Any I/O error ends the
/// session after a single report; restarting is the controller's decision.
pub(crate) async fn follow_loop(
    path: PathBuf,
    config: FollowConfig,
    sink: Arc<dyn EntrySink>,
    reporter: Arc<dyn StatusReporter>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    reporter.report(
        &format!("File: '{file_name}'"),
        &format!("File: {}", path.display()),
    );
    tracing::debug!(path = %path.display(), "worker started");

    let mut offset = 0u64;
    let mut next_sequence = 1u64;
    let mut delay = config.base_delay;

    loop {
        // Cancellation checkpoint before opening.
        match shutdown.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => {
                tracing::debug!("worker cancelled");
                return;
            }
        }

        let pass = match read_new_lines(&path, offset).await {
            Ok(pass) => pass,
            Err(err) => {
                tracing::warn!(path = %path.display(), "follow pass failed: {err}");
                reporter.report(
                    &format!("ERROR: {err}"),
                    &format!("File: {}\n\nError: {err}\n", path.display()),
                );
                return;
            }
        };
        offset = pass.offset;
        if pass.truncated {
            // The file has no prior history anymore; number its new
            // content from 1 again.
            next_sequence = 1;
        }

        let entries: Vec<LogEntry> = pass
            .lines
            .iter()
            .map(|line| {
                let entry = parse_line(next_sequence, line);
                next_sequence += 1;
                entry
            })
            .collect();

        let delivered = !entries.is_empty();
        if delivered {
            tracing::debug!(count = entries.len(), offset, "delivering batch");
            sink.append(entries);
        }
        delay = next_delay(delivered, delay, &config);

        // Interruptible wait: a stop request takes effect within one tick.
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::debug!("worker cancelled");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
