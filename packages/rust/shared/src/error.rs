//! Error types for ticketdoc.
//!
//! Library crates use [`TicketDocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Markdown conversion itself never fails; every variant here belongs to the
//! collaborators around it (config loading, tracker HTTP calls, file I/O).

use std::path::PathBuf;

/// Top-level error type for all ticketdoc operations.
#[derive(Debug, thiserror::Error)]
pub enum TicketDocError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level HTTP failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The tracker answered with a non-success status.
    #[error("tracker returned {status}: {body}")]
    Tracker { status: u16, body: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input rejected before any request was made (bad issue key, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// JSON encoding or decoding of a tracker payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TicketDocError>;

impl TicketDocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a tracker error from a response status and (possibly long) body.
    pub fn tracker(status: u16, body: impl Into<String>) -> Self {
        Self::Tracker {
            status,
            body: truncate_body(body.into(), 300),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn truncate_body(mut body: String, max_chars: usize) -> String {
    if let Some((idx, _)) = body.char_indices().nth(max_chars) {
        body.truncate(idx);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TicketDocError::config("missing tracker token");
        assert_eq!(err.to_string(), "config error: missing tracker token");

        let err = TicketDocError::validation("issue key 'abc' is malformed");
        assert!(err.to_string().contains("issue key 'abc'"));
    }

    #[test]
    fn tracker_error_truncates_long_bodies() {
        let err = TicketDocError::tracker(500, "x".repeat(1_000));
        match &err {
            TicketDocError::Tracker { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body.len(), 303);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected Tracker, got {other:?}"),
        }
        assert!(err.to_string().starts_with("tracker returned 500: "));
    }

    #[test]
    fn tracker_error_keeps_short_bodies() {
        let err = TicketDocError::tracker(404, "Issue does not exist");
        assert_eq!(err.to_string(), "tracker returned 404: Issue does not exist");
    }
}
