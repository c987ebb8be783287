//! One follow pass: open, detect truncation, read complete lines, close.

use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Result of one pass over the target file.
#[derive(Debug)]
pub(crate) struct FollowPass {
    /// Complete, non-blank lines in arrival order, right-trimmed.
    pub lines: Vec<String>,
    /// Byte offset of the first unread byte after this pass.
    pub offset: u64,
    /// True if the file shrank below the previous offset.
    pub truncated: bool,
}

/// Read everything between `offset` and the last complete line in the file.
///
/// A trailing line with no newline terminator is left unconsumed: the
/// returned offset stops at its first byte so the next pass re-reads it once
/// it is complete. The handle is closed before returning, so it is never
/// held across a wait interval.
pub(crate) async fn read_new_lines(path: &Path, offset: u64) -> Result<FollowPass> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = file.metadata().await.map_err(read_err)?;
    let length = metadata.len();

    let mut offset = offset;
    let truncated = is_truncated(length, offset);
    if truncated {
        tracing::debug!(length, offset, "file truncated, rewinding");
        offset = 0;
    }

    if length <= offset {
        return Ok(FollowPass {
            lines: Vec::new(),
            offset,
            truncated,
        });
    }

    file.seek(std::io::SeekFrom::Start(offset))
        .await
        .map_err(read_err)?;

    let mut buffer = Vec::with_capacity((length - offset) as usize);
    file.take(length - offset)
        .read_to_end(&mut buffer)
        .await
        .map_err(read_err)?;

    // Consume only up to the last newline; anything after it is a partial
    // line still being written.
    let Some(consumed) = complete_portion(&buffer) else {
        return Ok(FollowPass {
            lines: Vec::new(),
            offset,
            truncated,
        });
    };
    buffer.truncate(consumed);

    let text = String::from_utf8(buffer)?;
    Ok(FollowPass {
        lines: collect_lines(&text),
        offset: offset + consumed as u64,
        truncated,
    })
}

/// Detect truncation by comparing the current length with the read offset.
fn is_truncated(current_length: u64, offset: u64) -> bool {
    current_length < offset
}

/// Number of bytes up to and including the last newline, or `None` when the
/// buffer holds no complete line at all.
fn complete_portion(buffer: &[u8]) -> Option<usize> {
    buffer
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map(|index| index + 1)
}

/// Split on newlines, right-trim each line, drop the blank ones.
fn collect_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter_map(|line| {
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
