//! tests/common/mod.rs
//! A shared test helper to spawn the Axum app on an ephemeral port.

#![allow(dead_code)]

use std::borrow::Cow;

use axum::{serve, Router};
use error_envelope_api::config::{environment::EnvironmentVariables, state::AppState};
use error_envelope_api::core::server::create_app;
use serde_json::Value;
use tokio::net::TcpListener as TokioTcpListener;

/// Configuration for a given runtime mode with the built-in defaults
pub fn env(mode: &'static str) -> EnvironmentVariables {
    EnvironmentVariables::for_mode(Cow::Borrowed(mode))
}

/// Spawns the app on a random unused port and returns its base URL.
pub fn spawn_app(env: EnvironmentVariables) -> String {
    // * Build the application exactly as main() does.
    let app: Router = create_app(AppState::new(env));

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    // * Return the base URL, e.g. "http://127.0.0.1:12345".
    format!("http://{}", addr)
}

/// Checks the envelope fields every error response must carry and returns the body
pub async fn assert_envelope(resp: reqwest::Response, expected_status: u16) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let json: Value = resp.json().await.expect("Response body is not JSON");

    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], expected_status);
    assert!(json["message"].is_string());
    assert!(!json["error"].as_array().expect("error must be an array").is_empty());
    assert!(json.get("stack").is_some());

    json
}
