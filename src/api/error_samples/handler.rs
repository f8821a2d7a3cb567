// Sample handlers, each failing with a different kind of error

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use axum::{extract::{Path, State}, http::StatusCode, Json};
use anyhow::Context;
use tracing::{instrument, info};

use crate::config::state::AppState;
use crate::errors::{AppError, MapperError, PathSegment, RawError, SchemaValidationError, Validate};
use crate::utils::extractors::ValidatedJson;

// ! Emails already stored; creating a user with one of these hits the unique index
const TAKEN_EMAILS: &[&str] = &["taken@example.com"];
pub const KNOWN_USER_ID: &str = "64b7f0c2a1d3e4f5a6b7c8d9";
const MAX_TAG_LENGTH: usize = 20;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        let mut err: SchemaValidationError = SchemaValidationError::new();

        if self.name.trim().is_empty() {
            err = err.issue(["body", "name"], "Name is required");
        }

        if !self.email.contains('@') {
            err = err.issue(["body", "email"], "Invalid email address");
        }

        for (index, tag) in self.tags.iter().enumerate() {
            if tag.len() > MAX_TAG_LENGTH {
                err = err.issue(
                    [PathSegment::from("body"), PathSegment::from("tags"), PathSegment::from(index as u64)],
                    format!("Tag must be at most {MAX_TAG_LENGTH} characters"),
                );
            }
        }

        if err.is_empty() {
            return Ok(());
        }

        let stack: String = format!("SchemaValidationError: {err}");
        err.with_stack(stack).into_result()
    }
}

/// Liveness endpoint that never fails
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    info!("Health endpoint called");

    Json(json!({
        "status": "healthy",
        "environment": state.environment.environment.as_ref()
    }))
}

/// Validates the body, then rejects emails that already exist the way the driver would
#[instrument(skip(_state, request), fields(email = %request.email))]
pub async fn create_user_handler(
    State(_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), RawError> {
    if TAKEN_EMAILS.contains(&request.email.as_str()) {
        let message: String = format!(
            "E11000 duplicate key error collection: app.users index: email_1 dup key: {{ email: \"{}\" }}",
            request.email
        );

        return Err(MapperError::duplicate_key(message.clone())
            .with_key_value("email", request.email.clone())
            .with_stack(format!("MongoServerError: {message}"))
            .into());
    }

    info!("Created user {}", request.email);
    Ok((StatusCode::CREATED, Json(json!(request))))
}

/// Looks up a user by document id
#[instrument(skip(_state))]
pub async fn get_user_handler(
    State(_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RawError> {
    if !is_object_id(&id) {
        let err: MapperError = MapperError::cast("_id", id.as_str(), "ObjectId");
        let stack: String = format!("CastError: {err}");
        return Err(err.with_stack(stack).into());
    }

    if id != KNOWN_USER_ID {
        return Err(AppError::not_found("User not found").into());
    }

    Ok(Json(json!({ "id": id, "name": "Ada", "email": "ada@example.com" })))
}

/// Checks the body the way the object mapper's schema would
#[instrument(skip(_state, payload))]
pub async fn create_product_handler(
    State(_state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), RawError> {
    let mut err: MapperError = MapperError::validation();

    match payload.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => err = err.field("name", "Path `name` is required."),
    }

    match payload.get("price") {
        None | Some(Value::Null) => err = err.field("price", "Path `price` is required."),
        Some(Value::Number(price)) if price.as_f64().is_some_and(|p: f64| p < 0.0) => {
            err = err.field(
                "price",
                format!("Path `price` ({price}) is less than minimum allowed value (0)."),
            );
        }
        Some(Value::Number(_)) => {}
        Some(other) => {
            err = err.field(
                "price",
                format!("Cast to Number failed for value {other} at path \"price\""),
            );
        }
    }

    if !err.errors.is_empty() {
        let stack: String = format!("ValidationError: Product validation failed: {}", err.errors.len());
        return Err(err.with_stack(stack).into());
    }

    Ok((StatusCode::CREATED, Json(payload)))
}

/// Fails with a plain runtime error carrying a cause chain
#[instrument]
pub async fn runtime_error_handler() -> Result<Json<Value>, RawError> {
    info!("Testing deliberate runtime error");

    let result: anyhow::Result<Value> = Err(std::io::Error::other("connection refused"))
        .context("Failed to reach the payment provider");

    Ok(Json(result?))
}

/// Fails with a value that has no error shape at all
#[instrument]
pub async fn unknown_error_handler() -> Result<Json<Value>, RawError> {
    info!("Testing deliberate shapeless error");
    Err(RawError::Unknown(json!("something odd was thrown")))
}

/// Panics inside the handler
#[instrument]
pub async fn panic_handler() -> Json<Value> {
    info!("Testing deliberate panic");
    panic!("Deliberate panic for testing purposes");
}

/// Sleeps beyond the configured timeout to trigger the timeout layer
#[instrument(skip(state))]
pub async fn timeout_handler(State(state): State<AppState>) -> Json<Value> {
    let timeout_seconds: u64 = state.environment.default_timeout_seconds;

    info!("Testing timeout: sleeping for {} seconds (timeout is set to {} seconds)",
          timeout_seconds + 2, timeout_seconds);

    tokio::time::sleep(std::time::Duration::from_secs(timeout_seconds + 2)).await;

    // Should never be reached due to timeout
    Json(json!({ "message": "This should not be reached due to timeout" }))
}

fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c: char| c.is_ascii_hexdigit())
}
