// Error taxonomy for the API and the normalization pipeline that turns any of
// it into the uniform JSON error envelope.

pub mod app_error;
pub mod envelope;
pub mod mapper;
pub mod runtime;
pub mod schema;
pub mod source;

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

pub use app_error::AppError;
pub use envelope::{normalize, ResponseEnvelope};
pub use mapper::MapperError;
pub use runtime::RuntimeError;
pub use schema::{PathSegment, SchemaValidationError, Validate, ValidationIssue};
pub use source::{ErrorPath, ErrorSource, NormalizedError};

/// Every kind of failure a request can end with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RawError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
    #[error(transparent)]
    Mapper(#[from] MapperError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A value of no recognized shape
    #[error("{0}")]
    Unknown(Value),
}

/// Classification of a [`RawError`]; decides which formatter handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaValidation,
    MapperValidation,
    MapperCast,
    MapperDuplicateKey,
    ApplicationDefined,
    GenericRuntime,
    Unknown,
}

impl RawError {
    /// First match wins, in this order: schema validation, mapper validation,
    /// mapper cast, duplicate key, application error, anything with a
    /// message, unknown.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RawError::Schema(_) => ErrorKind::SchemaValidation,
            RawError::Mapper(err) if err.has_name(mapper::VALIDATION_ERROR_NAME) => ErrorKind::MapperValidation,
            RawError::Mapper(err) if err.has_name(mapper::CAST_ERROR_NAME) => ErrorKind::MapperCast,
            RawError::Mapper(err) if err.code == Some(mapper::DUPLICATE_KEY_CODE) => ErrorKind::MapperDuplicateKey,
            RawError::App(_) => ErrorKind::ApplicationDefined,
            RawError::Mapper(err) if err.message.is_some() => ErrorKind::GenericRuntime,
            RawError::Runtime(_) => ErrorKind::GenericRuntime,
            RawError::Mapper(_) | RawError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RawError::Schema(_) => Some(schema::VALIDATION_ERROR_MESSAGE),
            RawError::Mapper(err) => err.message.as_deref(),
            RawError::App(err) => Some(err.message.as_str()),
            RawError::Runtime(err) => Some(err.message.as_str()),
            RawError::Unknown(_) => None,
        }
    }

    /// Stack text carried by the error, if it has one
    pub fn stack(&self) -> Option<&str> {
        match self {
            RawError::Schema(err) => err.stack.as_deref(),
            RawError::Mapper(err) => err.stack.as_deref(),
            RawError::App(err) => err.stack.as_deref(),
            RawError::Runtime(err) => err.stack.as_deref(),
            RawError::Unknown(value) => value.get("stack").and_then(Value::as_str),
        }
    }
}

impl From<anyhow::Error> for RawError {
    fn from(err: anyhow::Error) -> Self {
        RawError::Runtime(err.into())
    }
}

impl From<std::io::Error> for RawError {
    fn from(err: std::io::Error) -> Self {
        RawError::Runtime(err.into())
    }
}

impl From<JsonRejection> for RawError {
    fn from(rejection: JsonRejection) -> Self {
        RawError::App(AppError::new(rejection.status(), rejection.body_text()))
    }
}

/// Renders a production envelope and keeps the error in the response
/// extensions, so the global error handler can re-render it for the
/// configured runtime mode.
impl IntoResponse for RawError {
    fn into_response(self) -> Response {
        let mut response: Response = normalize(&self, false).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
