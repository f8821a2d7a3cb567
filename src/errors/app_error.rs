// Errors raised deliberately by the application with an explicit HTTP status

use std::backtrace::Backtrace;

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    pub status_code: StatusCode,
    pub message: String,
    pub stack: Option<String>,
}

impl AppError {
    /// Creates an error and records where it was raised.
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        let stack: String = format!("AppError: {message}\n{}", Backtrace::capture());

        Self {
            status_code,
            message,
            stack: Some(stack),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
