// Library root for an Axum API with a global JSON error envelope

pub mod api;
pub mod config;
pub mod core;
pub mod errors;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
pub use crate::errors::{normalize, ErrorKind, RawError, ResponseEnvelope};
