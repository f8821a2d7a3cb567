// Request extractors that fail with a RawError instead of axum's plain-text rejections

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::errors::{PathSegment, RawError, SchemaValidationError, Validate};

// serde reports a missing field against the enclosing object, not the field itself
static MISSING_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^missing field `([^`]+)`").unwrap());

/// JSON body that has been deserialized and passed `Validate`.
/// Bodies that are not JSON at all are rejected with the rejection's own
/// status. Bodies that are JSON but have the wrong shape (missing field,
/// wrong type) and bodies that fail validation become a schema-validation
/// error naming the offending field.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = RawError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let value: T = deserialize_body(body)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Deserializes an already-parsed body, reporting a shape mismatch as a
/// single validation issue rooted at `body`.
pub fn deserialize_body<T: DeserializeOwned>(body: Value) -> Result<T, SchemaValidationError> {
    serde_path_to_error::deserialize(body).map_err(|err| {
        let message: String = err.inner().to_string();

        let mut path: Vec<PathSegment> = vec![PathSegment::from("body")];
        path.extend(err.path().iter().filter_map(|segment| match segment {
            Segment::Map { key } => Some(PathSegment::Key(key.clone())),
            Segment::Seq { index } => Some(PathSegment::Index(*index as u64)),
            Segment::Enum { .. } | Segment::Unknown => None,
        }));
        if let Some(field) = MISSING_FIELD.captures(&message).and_then(|caps| caps.get(1)) {
            path.push(PathSegment::Key(field.as_str().to_owned()));
        }

        SchemaValidationError::new()
            .issue(path, message.clone())
            .with_stack(format!("SchemaValidationError: {message}"))
    })
}
