//! Error types for the follow engine.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for follow operations.
///
/// Cancellation is not represented here: a stop request is ordinary control
/// flow, observed by the worker at its checkpoints, and never surfaces as an
/// error.
#[derive(Error, Debug)]
pub enum Error {
    /// The target file could not be opened at the start of a pass.
    /// Fatal to the session: missing or inaccessible files are reported,
    /// not retried.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while reading from an already-open handle.
    #[error("read error on {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destructive truncate operation failed.
    #[error("cannot truncate {path}: {source}")]
    Truncate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The consumed region of the file was not valid UTF-8.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A convenient Result type for follow operations.
pub type Result<T> = std::result::Result<T, Error>;
