//! tests/global_errors/not_found.rs
//! Unknown routes and unknown resources both answer with a 404 envelope.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common::{assert_envelope, env, spawn_app};

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    let json: Value = assert_envelope(resp, 404).await;

    assert_eq!(json["message"], "API Not Found!");
    assert_eq!(json["error"], json!([{ "path": "", "message": "API Not Found!" }]));
    assert_eq!(json["stack"], Value::Null);
}

#[tokio::test]
async fn application_error_keeps_its_status_and_message() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/users/{}", base_url, "aaaaaaaaaaaaaaaaaaaaaaaa"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "success": false,
            "statusCode": 404,
            "message": "User not found",
            "error": [{ "path": "", "message": "User not found" }],
            "stack": null
        })
    );
}

#[tokio::test]
async fn successful_requests_are_left_alone() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/users/64b7f0c2a1d3e4f5a6b7c8d9", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["name"], "Ada");
    assert!(json.get("success").is_none());
}
