//! Test utilities: temporary log files, collecting test doubles, timing.

use crate::entry::LogEntry;
use crate::sink::{EntrySink, StatusReporter};
use crate::stream::SinkEvent;
use crate::worker::FollowConfig;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

pub struct TempLogFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new temporary log file for testing
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        // Create the file
        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file holding exactly `content` (no added newline)
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append_raw(content)?;
        Ok(temp_file)
    }

    /// Append one line plus a newline terminator
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;

        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }

    /// Append exactly `content`, without a newline terminator
    pub fn append_raw(&self, content: &str) -> std::io::Result<()> {
        self.append_bytes(content.as_bytes())
    }

    /// Append raw bytes (for non-UTF-8 cases)
    pub fn append_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;

        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }

    /// Truncate the file (simulate log rotation)
    pub fn truncate(&self) -> std::io::Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Entry sink that records every call for later assertions.
pub struct CollectingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Every sink call, in order.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All delivered batches, in order, ignoring clears.
    pub fn batches(&self) -> Vec<Vec<LogEntry>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Batch(batch) => Some(batch),
                SinkEvent::Clear => None,
            })
            .collect()
    }

    /// All delivered entries, flattened, in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }

    /// Entries delivered after the most recent clear.
    pub fn entries_since_clear(&self) -> Vec<LogEntry> {
        let events = self.events();
        let start = events
            .iter()
            .rposition(|event| *event == SinkEvent::Clear)
            .map_or(0, |index| index + 1);
        events[start..]
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Batch(batch) => Some(batch.clone()),
                SinkEvent::Clear => None,
            })
            .flatten()
            .collect()
    }
}

impl EntrySink for CollectingSink {
    fn append(&self, entries: Vec<LogEntry>) {
        self.events.lock().unwrap().push(SinkEvent::Batch(entries));
    }

    fn clear(&self) {
        self.events.lock().unwrap().push(SinkEvent::Clear);
    }
}

/// Status reporter that records every call.
pub struct CollectingReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl StatusReporter for CollectingReporter {
    fn report(&self, summary: &str, details: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((summary.to_string(), details.to_string()));
    }
}

/// Short poll delays so timing-sensitive tests finish quickly.
pub fn fast_config() -> FollowConfig {
    FollowConfig {
        base_delay: Duration::from_millis(20),
        max_delay: Duration::from_millis(100),
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let start = tokio::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[tokio::test]
    async fn test_with_content_writes_exact_bytes() {
        let temp_file = TempLogFile::with_content("a\nb").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "a\nb");
    }

    #[tokio::test]
    async fn test_append_line_terminates() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file.append_line("line 1").unwrap();
        temp_file.append_line("line 2").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
    }

    #[tokio::test]
    async fn test_truncate() {
        let temp_file = TempLogFile::with_content("initial content").unwrap();
        temp_file.truncate().unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_collecting_sink_entries_since_clear() {
        let sink = CollectingSink::new();
        sink.append(vec![crate::entry::parse_line(1, "{}")]);
        sink.clear();
        sink.append(vec![
            crate::entry::parse_line(1, "{}"),
            crate::entry::parse_line(2, "{}"),
        ]);

        assert_eq!(sink.entry_count(), 3);
        assert_eq!(sink.entries_since_clear().len(), 2);
    }
}
