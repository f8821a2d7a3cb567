// Sample route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::config::state::AppState;
use super::handler;

/// Creates router with endpoints that raise each kind of error
pub fn error_sample_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handler::health_handler))
        // Schema validation (400) and duplicate email (400)
        .route("/users", post(handler::create_user_handler))
        // Cast error for malformed ids, 404 for unknown ones
        .route("/users/{id}", get(handler::get_user_handler))
        // Object-mapper validation (400)
        .route("/products", post(handler::create_product_handler))
        .route("/errors/runtime", get(handler::runtime_error_handler))
        .route("/errors/unknown", get(handler::unknown_error_handler))
        .route("/errors/panic", get(handler::panic_handler))
        // Sleeps past the configured timeout
        .route("/errors/timeout", get(handler::timeout_handler))
}
