//! The entry data model and the line parser.

use serde::Serialize;
use serde_json::Value;

/// One parsed, displayable unit derived from a single log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// 1-based position among non-blank lines within the session.
    pub sequence: u64,
    /// Stringified top-level `"time"` field, or empty if absent.
    pub time: String,
    /// Stringified top-level `"id"` field, or empty if absent.
    pub id: String,
    /// The raw line on success, or a one-line error description.
    pub summary: String,
    /// Pretty-printed JSON on success, or a diagnostic block on failure.
    pub details: String,
    /// True iff the line parsed as valid JSON.
    pub ok: bool,
}

/// Parse one log line into a [`LogEntry`].
///
/// Total: malformed input becomes a non-`ok` entry, never an error. Trailing
/// whitespace is trimmed before parsing. Callers must filter out lines that
/// are blank after trimming and must not advance `sequence` for them.
pub fn parse_line(sequence: u64, raw: &str) -> LogEntry {
    let line = raw.trim_end();

    let parsed: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            return LogEntry {
                sequence,
                time: String::new(),
                id: String::new(),
                summary: format!("Error at line {sequence}: {err}"),
                details: format!("Error at line {sequence}\n\nError: {err}\n\nLine: {line}"),
                ok: false,
            };
        }
    };

    // Pretty-printing a just-parsed Value cannot fail.
    let details = serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| line.to_string());

    LogEntry {
        sequence,
        time: field_text(&parsed, "time"),
        id: field_text(&parsed, "id"),
        summary: line.to_string(),
        details,
        ok: true,
    }
}

/// Stringify a top-level field: strings are used verbatim, `null` and absent
/// fields map to empty, anything else keeps its compact JSON text.
fn field_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
