// Global error handling: every failed request ends here and leaves as a JSON error envelope

use std::any::Any;
use std::error::Error;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, Response, StatusCode, Uri},
    middleware::Next,
    response::IntoResponse,
    BoxError,
};
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
// Axum uses http_body_util for length-limiting and body collection
use http_body_util::{BodyExt, LengthLimitError};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::state::AppState;
use crate::errors::{normalize, AppError, RawError, ResponseEnvelope, RuntimeError};

pub const NOT_FOUND_MESSAGE: &str = "API Not Found!";

/// Middleware that turns every error response into the error envelope.
/// Errors raised as `RawError` are re-rendered for the configured runtime
/// mode; any other 4xx/5xx response (framework rejections) is wrapped as an
/// application error with the same status.
pub async fn global_error_handler(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let method: Method = req.method().clone();
    let uri: Uri = req.uri().clone();

    let response: Response<Body> = next.run(req).await;

    let raised: Option<RawError> = response.extensions().get::<RawError>().cloned();

    let err: RawError = match raised {
        Some(err) => err,
        None if is_error_status(response.status()) => rejection_to_error(response).await,
        None => return response,
    };

    let envelope: ResponseEnvelope = normalize(&err, state.environment.is_development());
    log_error_envelope(&method, &uri, &err, &envelope);

    envelope.into_response()
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// Wraps a plain error response, using its body text as the message
async fn rejection_to_error(response: Response<Body>) -> RawError {
    let (parts, body) = response.into_parts();

    let text: String = match body.collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).trim().to_string(),
        Err(err) => {
            warn!("Failed to read error response body: {err}");
            String::new()
        }
    };

    let message: String = if text.is_empty() {
        parts.status.canonical_reason().unwrap_or("Unknown Error").to_string()
    } else {
        text
    };

    AppError::new(parts.status, message).into()
}

/// Logs the error and, at debug level, the pretty-printed envelope
fn log_error_envelope(method: &Method, uri: &Uri, err: &RawError, envelope: &ResponseEnvelope) {
    let status: StatusCode = envelope.status();

    if status.is_server_error() {
        error!(%method, %uri, kind = ?err.kind(), status = status.as_u16(), "Request failed: {err}");
    } else {
        warn!(%method, %uri, kind = ?err.kind(), status = status.as_u16(), "Request rejected: {err}");
    }

    match serde_json::to_string_pretty(envelope) {
        Ok(spaced_json) => debug!("\nError response:\n{}", spaced_json),
        Err(err) => error!("Failed to format error response JSON: {:?}", err),
    }
}

/// Maps errors raised by tower layers (timeouts, body limits) for `HandleErrorLayer`
pub async fn handle_layer_error(err: BoxError) -> RawError {
    // 408 if the request took too long
    if err.is::<Elapsed>() {
        return AppError::new(StatusCode::REQUEST_TIMEOUT, "Request timeout").into();
    }

    // 413 if the body was too large
    if err.is::<LengthLimitError>() || find_cause::<LengthLimitError>(&*err).is_some() {
        return AppError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into();
    }

    // Otherwise, 500 with the layer's message
    RuntimeError::new(err.to_string()).into()
}

/// Converts a handler panic into an error response for `CatchPanicLayer`
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message: Option<String> = if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        payload.downcast_ref::<&str>().map(|s| s.to_string())
    };

    let err: RawError = match message {
        Some(message) => {
            let stack: String = format!("Panic: {message}");
            RuntimeError::new(message).with_stack(stack).into()
        }
        None => RawError::Unknown(Value::Null),
    };

    err.into_response()
}

/// Fallback for routes that do not exist
pub async fn not_found_fallback(uri: Uri) -> RawError {
    debug!("No route for {uri}");
    AppError::not_found(NOT_FOUND_MESSAGE).into()
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}
