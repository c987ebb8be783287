//! Supervision of the single active follow worker.

use crate::error::{Error, Result};
use crate::sink::{EntrySink, StatusReporter};
use crate::worker::{FollowConfig, follow_loop};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Supervises exactly one follow worker at a time.
///
/// Every operation that replaces the worker first cancels the old one and
/// waits for its task to exit, so a stale worker can never append to the
/// sink after it has been cleared.
pub struct SessionController {
    sink: Arc<dyn EntrySink>,
    reporter: Arc<dyn StatusReporter>,
    config: FollowConfig,
    active: Option<ActiveWorker>,
}

struct ActiveWorker {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl SessionController {
    /// Create a controller with the default poll timing.
    pub fn new(sink: Arc<dyn EntrySink>, reporter: Arc<dyn StatusReporter>) -> Self {
        Self::with_config(sink, reporter, FollowConfig::default())
    }

    /// Create a controller with explicit poll timing.
    pub fn with_config(
        sink: Arc<dyn EntrySink>,
        reporter: Arc<dyn StatusReporter>,
        config: FollowConfig,
    ) -> Self {
        Self {
            sink,
            reporter,
            config,
            active: None,
        }
    }

    /// Start following `path`, replacing any active session.
    ///
    /// The old worker is cancelled and joined before the sink is cleared,
    /// then a fresh session starts at offset 0 with sequence numbering
    /// restarting from 1.
    pub async fn start(&mut self, path: impl Into<PathBuf>) {
        self.stop().await;
        self.sink.clear();
        self.spawn(path.into());
    }

    /// Stop the active session, waiting for the worker to fully exit.
    /// A no-op when nothing is running.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.active.take() {
            tracing::debug!("stopping worker");
            // The worker may already have exited (Failed state); a closed
            // channel is fine either way.
            let _ = worker.shutdown_tx.send(());
            let _ = worker.handle.await;
        }
    }

    /// Stop and start again, used when the user selects a different file.
    pub async fn reload(&mut self, path: impl Into<PathBuf>) {
        self.stop().await;
        self.start(path).await;
    }

    /// Destructively truncate `path` to zero length and follow it afresh.
    ///
    /// The truncate happens strictly after the old worker has exited, so it
    /// cannot race an in-flight read.
    pub async fn truncate_and_restart(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.stop().await;

        tokio::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|source| Error::Truncate {
                path: path.clone(),
                source,
            })?;

        self.sink.clear();
        self.spawn(path);
        Ok(())
    }

    /// Whether a worker task is currently supervised.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    fn spawn(&mut self, path: PathBuf) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(follow_loop(
            path,
            self.config,
            Arc::clone(&self.sink),
            Arc::clone(&self.reporter),
            shutdown_rx,
        ));
        self.active = Some(ActiveWorker {
            shutdown_tx,
            handle,
        });
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        // Best effort: signal the worker; joining is not possible in drop.
        if let Some(worker) = self.active.take() {
            let _ = worker.shutdown_tx.send(());
        }
    }
}
