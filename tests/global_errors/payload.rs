//! tests/global_errors/payload.rs
//! Bodies that are too large or not JSON are still answered with an envelope.

use error_envelope_api::config::environment::EnvironmentVariables;
use serde_json::Value;

use crate::common::{assert_envelope, env, spawn_app};

#[tokio::test]
async fn returns_413_when_payload_exceeds_global_limit() {
    let config: EnvironmentVariables = EnvironmentVariables {
        max_request_body_size: 1024,
        ..env("production")
    };
    let base_url: String = spawn_app(config);

    let oversized_payload: Vec<u8> = vec![b'X'; 1024 + 100];

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .header("content-type", "application/json")
        .body(oversized_payload)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_envelope(resp, 413).await;
}

#[tokio::test]
async fn malformed_json_is_a_400() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;
    assert_eq!(json["error"][0]["path"], "");
}

#[tokio::test]
async fn framework_rejections_are_wrapped() {
    let base_url: String = spawn_app(env("production"));

    // Missing content type is rejected by the plain Json extractor on /products
    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/products", base_url))
        .body(r#"{"name":"Lamp","price":10}"#)
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 415).await;
    assert!(!json["message"].as_str().unwrap().is_empty());
}
