//! tests/global_errors/validation.rs
//! Validation, cast and duplicate-key failures map to 400 envelopes.

use serde_json::{json, Value};

use crate::common::{assert_envelope, env, spawn_app};

#[tokio::test]
async fn schema_validation_lists_every_issue_by_last_path_segment() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .json(&json!({
            "name": " ",
            "email": "not-an-email",
            "tags": ["ok", "this-tag-is-way-too-long-to-accept"]
        }))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    assert_eq!(json["message"], "Validation Error");
    assert_eq!(
        json["error"],
        json!([
            { "path": "name", "message": "Name is required" },
            { "path": "email", "message": "Invalid email address" },
            { "path": 1, "message": "Tag must be at most 20 characters" }
        ])
    );
}

#[tokio::test]
async fn missing_field_is_a_validation_error_at_that_field() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .json(&json!({ "name": "Ada" }))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    assert_eq!(json["message"], "Validation Error");
    assert_eq!(json["error"][0]["path"], "email");
    assert_eq!(json["error"][0]["message"], "missing field `email`");
}

#[tokio::test]
async fn wrongly_typed_field_is_a_validation_error_at_that_field() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .json(&json!({ "name": "Ada", "email": 5 }))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    assert_eq!(json["message"], "Validation Error");
    assert_eq!(json["error"][0]["path"], "email");
}

#[tokio::test]
async fn mapper_validation_lists_each_field() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/products", base_url))
        .json(&json!({ "price": -5 }))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    let paths: Vec<&str> = json["error"]
        .as_array()
        .unwrap()
        .iter()
        .map(|source| source["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["name", "price"]);
}

#[tokio::test]
async fn malformed_id_is_a_cast_error() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/users/not-an-id", base_url))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    assert_eq!(json["message"], "Invalid ID");
    assert_eq!(json["error"][0]["path"], "_id");
    assert!(json["error"][0]["message"].as_str().unwrap().contains("not-an-id"));
}

#[tokio::test]
async fn duplicate_email_names_the_value() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .json(&json!({ "name": "Ada", "email": "taken@example.com" }))
        .send()
        .await
        .expect("Failed to send request.");

    let json: Value = assert_envelope(resp, 400).await;

    assert!(json["message"].as_str().unwrap().contains("taken@example.com already exists"));
    assert_eq!(json["error"][0]["path"], "");
}

#[tokio::test]
async fn valid_user_is_created() {
    let base_url: String = spawn_app(env("production"));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/users", base_url))
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .send()
        .await
        .expect("Failed to send request.");

    assert_eq!(resp.status().as_u16(), 201);
}
