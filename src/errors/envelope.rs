// The error normalizer and the JSON envelope it produces

use std::panic::{self, AssertUnwindSafe};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::mapper::{format_duplicate_key, format_mapper_cast, format_mapper_validation};
use super::schema::format_schema_validation;
use super::source::{ErrorSource, NormalizedError};
use super::{ErrorKind, RawError};

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong!";

/// Body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub error: Vec<ErrorSource>,
    pub stack: Option<String>,
}

impl ResponseEnvelope {
    fn from_normalized(normalized: NormalizedError, stack: Option<String>) -> Self {
        Self {
            success: false,
            status_code: normalized.status_code.as_u16(),
            message: normalized.message,
            error: normalized.error_sources,
            stack,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Converts any error into the envelope sent to the client. The stack is only
/// included when `dev_mode` is set. Never panics: a formatter that fails is
/// replaced by the generic 500 response.
pub fn normalize(err: &RawError, dev_mode: bool) -> ResponseEnvelope {
    normalize_with(err, dev_mode, format_by_kind)
}

fn normalize_with<F>(err: &RawError, dev_mode: bool, formatter: F) -> ResponseEnvelope
where
    F: FnOnce(&RawError) -> NormalizedError,
{
    let normalized: NormalizedError = panic::catch_unwind(AssertUnwindSafe(|| formatter(err)))
        .unwrap_or_else(|_| {
            error!(kind = ?err.kind(), "Error formatter panicked, using the default error response");
            default_error()
        });

    let stack: Option<String> = if dev_mode {
        err.stack().map(str::to_owned)
    } else {
        None
    };

    ResponseEnvelope::from_normalized(normalized, stack)
}

fn format_by_kind(err: &RawError) -> NormalizedError {
    match (err.kind(), err) {
        (ErrorKind::SchemaValidation, RawError::Schema(schema)) => format_schema_validation(schema),
        (ErrorKind::MapperValidation, RawError::Mapper(mapper)) => format_mapper_validation(mapper),
        (ErrorKind::MapperCast, RawError::Mapper(mapper)) => format_mapper_cast(mapper),
        (ErrorKind::MapperDuplicateKey, RawError::Mapper(mapper)) => format_duplicate_key(mapper),
        (ErrorKind::ApplicationDefined, RawError::App(app)) => {
            NormalizedError::single(app.status_code, app.message.clone())
        }
        (ErrorKind::GenericRuntime, _) => match err.message() {
            Some(message) => NormalizedError::single(StatusCode::INTERNAL_SERVER_ERROR, message),
            None => default_error(),
        },
        _ => default_error(),
    }
}

fn default_error() -> NormalizedError {
    NormalizedError::single(StatusCode::INTERNAL_SERVER_ERROR, DEFAULT_ERROR_MESSAGE)
}
