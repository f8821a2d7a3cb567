// Schema-validation errors raised while checking request input

use axum::http::StatusCode;
use thiserror::Error;

use super::source::{ErrorPath, ErrorSource, NormalizedError};

pub const VALIDATION_ERROR_MESSAGE: &str = "Validation Error";

/// One step into the validated input: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(u64),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<u64> for PathSegment {
    fn from(index: u64) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&PathSegment> for ErrorPath {
    fn from(segment: &PathSegment) -> Self {
        match segment {
            PathSegment::Key(key) => ErrorPath::Key(key.clone()),
            PathSegment::Index(index) => ErrorPath::Index(*index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("schema validation failed with {} issue(s)", .issues.len())]
pub struct SchemaValidationError {
    pub issues: Vec<ValidationIssue>,
    pub stack: Option<String>,
}

impl SchemaValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue; issues keep the order they were reported in.
    pub fn issue<I, S>(mut self, path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.issues.push(ValidationIssue {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        });
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when no issue was collected, the error itself otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Structural validation for request bodies.
pub trait Validate {
    fn validate(&self) -> Result<(), SchemaValidationError>;
}

/// One error source per issue, keyed by the deepest segment of its path.
pub fn format_schema_validation(err: &SchemaValidationError) -> NormalizedError {
    let error_sources: Vec<ErrorSource> = err
        .issues
        .iter()
        .map(|issue: &ValidationIssue| ErrorSource {
            path: issue.path.last().map(ErrorPath::from).unwrap_or_default(),
            message: issue.message.clone(),
        })
        .collect();

    NormalizedError::new(StatusCode::BAD_REQUEST, VALIDATION_ERROR_MESSAGE, error_sources)
}
