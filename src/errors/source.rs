// Field-level error sources and the normalized error they belong to

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Identifies the input field (or array index) that caused a failure.
/// An empty key means "no specific field".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPath {
    Index(u64),
    Key(String),
}

impl ErrorPath {
    pub fn empty() -> Self {
        ErrorPath::Key(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ErrorPath::Key(key) if key.is_empty())
    }
}

impl Default for ErrorPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for ErrorPath {
    fn from(key: &str) -> Self {
        ErrorPath::Key(key.to_owned())
    }
}

impl From<String> for ErrorPath {
    fn from(key: String) -> Self {
        ErrorPath::Key(key)
    }
}

impl From<u64> for ErrorPath {
    fn from(index: u64) -> Self {
        ErrorPath::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    pub path: ErrorPath,
    pub message: String,
}

impl ErrorSource {
    pub fn new(path: impl Into<ErrorPath>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// A source that is not tied to any particular field
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            path: ErrorPath::empty(),
            message: message.into(),
        }
    }
}

/// Result of classifying a raw error, before it is wrapped in the wire envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub status_code: StatusCode,
    pub message: String,
    pub error_sources: Vec<ErrorSource>,
}

impl NormalizedError {
    /// Builds a normalized error. An empty source list is replaced by a single
    /// general source carrying `message`, so `error_sources` is never empty.
    pub fn new(status_code: StatusCode, message: impl Into<String>, error_sources: Vec<ErrorSource>) -> Self {
        let message: String = message.into();
        let error_sources: Vec<ErrorSource> = if error_sources.is_empty() {
            vec![ErrorSource::general(message.clone())]
        } else {
            error_sources
        };

        Self {
            status_code,
            message,
            error_sources,
        }
    }

    /// One general source whose message repeats the top-level message
    pub fn single(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status_code, message, Vec::new())
    }
}
