// Errors produced by the object-document mapper and its driver, plus their formatters

use axum::http::StatusCode;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::schema::VALIDATION_ERROR_MESSAGE;
use super::source::{ErrorPath, ErrorSource, NormalizedError};

pub const VALIDATION_ERROR_NAME: &str = "ValidationError";
pub const CAST_ERROR_NAME: &str = "CastError";
pub const DUPLICATE_KEY_CODE: i64 = 11000;

pub const CAST_ERROR_MESSAGE: &str = "Invalid ID";
pub const DUPLICATE_KEY_FALLBACK_MESSAGE: &str = "Duplicate key already exists";

// ! Drivers quote the duplicated value, e.g. `dup key: { email: "x@y.com" }`
static QUOTED_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperFieldError {
    pub path: Option<String>,
    pub message: Option<String>,
    pub kind: Option<String>,
    pub value: Option<Value>,
}

/// Loosely-shaped mapper error. Every field is optional because drivers and
/// mapper versions disagree on which ones they populate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[serde(default, rename_all = "camelCase")]
#[error("{}", .message.as_deref().unwrap_or("object mapper error"))]
pub struct MapperError {
    pub name: Option<String>,
    pub code: Option<i64>,
    pub message: Option<String>,
    pub errors: IndexMap<String, MapperFieldError>,
    pub path: Option<String>,
    pub value: Option<Value>,
    pub kind: Option<String>,
    pub key_value: IndexMap<String, Value>,
    pub stack: Option<String>,
}

impl MapperError {
    pub fn validation() -> Self {
        Self {
            name: Some(VALIDATION_ERROR_NAME.to_owned()),
            message: Some("Validation failed".to_owned()),
            ..Self::default()
        }
    }

    /// Adds a field error; fields keep insertion order.
    pub fn field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        let field: String = field.into();
        self.errors.insert(
            field.clone(),
            MapperFieldError {
                path: Some(field),
                message: Some(message.into()),
                ..MapperFieldError::default()
            },
        );
        self
    }

    pub fn cast(path: impl Into<String>, value: impl Into<Value>, kind: impl Into<String>) -> Self {
        let path: String = path.into();
        let value: Value = value.into();
        let kind: String = kind.into();

        Self {
            name: Some(CAST_ERROR_NAME.to_owned()),
            message: Some(cast_description(&kind, &value, &path)),
            path: Some(path),
            value: Some(value),
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self {
            name: Some("MongoServerError".to_owned()),
            code: Some(DUPLICATE_KEY_CODE),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.key_value.insert(key.into(), value.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

fn cast_description(kind: &str, value: &Value, path: &str) -> String {
    format!("Cast to {kind} failed for value {value} at path \"{path}\"")
}

/// Renders a JSON value the way it appeared to the user: strings unquoted.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One error source per invalid field, in the order the mapper reported them.
pub fn format_mapper_validation(err: &MapperError) -> NormalizedError {
    let error_sources: Vec<ErrorSource> = err
        .errors
        .iter()
        .map(|(field, sub_error)| ErrorSource {
            path: ErrorPath::from(sub_error.path.clone().unwrap_or_else(|| field.clone())),
            message: sub_error.message.clone().unwrap_or_default(),
        })
        .collect();

    NormalizedError::new(StatusCode::BAD_REQUEST, VALIDATION_ERROR_MESSAGE, error_sources)
}

pub fn format_mapper_cast(err: &MapperError) -> NormalizedError {
    let path: String = err.path.clone().unwrap_or_default();
    let description: String = match &err.message {
        Some(message) => message.clone(),
        None => cast_description(
            err.kind.as_deref().unwrap_or("ObjectId"),
            err.value.as_ref().unwrap_or(&Value::Null),
            &path,
        ),
    };

    NormalizedError::new(
        StatusCode::BAD_REQUEST,
        CAST_ERROR_MESSAGE,
        vec![ErrorSource::new(path, description)],
    )
}

/// Pulls the duplicated value out of a driver message. Kept as the single
/// place that knows the driver's message layout.
pub fn extract_duplicate_value(message: &str) -> Option<&str> {
    QUOTED_VALUE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .filter(|value: &&str| !value.is_empty())
}

pub fn format_duplicate_key(err: &MapperError) -> NormalizedError {
    let duplicated: Option<String> = err
        .message
        .as_deref()
        .and_then(extract_duplicate_value)
        .map(str::to_owned)
        .or_else(|| err.key_value.values().next().map(display_value));

    let message: String = match duplicated {
        Some(value) => format!("{value} already exists"),
        None => DUPLICATE_KEY_FALLBACK_MESSAGE.to_owned(),
    };

    NormalizedError::single(StatusCode::BAD_REQUEST, message)
}
