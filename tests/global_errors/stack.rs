//! tests/global_errors/stack.rs
//! Stack traces reach the client only in development mode.

use serde_json::Value;

use crate::common::{assert_envelope, env, spawn_app};

const ERROR_ROUTES: &[(&str, u16)] = &[
    ("/users/not-an-id", 400),
    ("/users/aaaaaaaaaaaaaaaaaaaaaaaa", 404),
    ("/errors/runtime", 500),
    ("/errors/panic", 500),
];

#[tokio::test]
async fn development_mode_includes_the_stack() {
    let base_url: String = spawn_app(env("development"));

    for (path, status) in ERROR_ROUTES {
        let resp: reqwest::Response = reqwest::Client::new()
            .get(format!("{}{}", base_url, path))
            .send()
            .await
            .expect("Failed to make request.");

        let json: Value = assert_envelope(resp, *status).await;
        assert!(json["stack"].is_string(), "{path} should carry a stack");
    }
}

#[tokio::test]
async fn other_modes_hide_the_stack() {
    for mode in ["production", "staging"] {
        let base_url: String = spawn_app(env(mode));

        for (path, status) in ERROR_ROUTES {
            let resp: reqwest::Response = reqwest::Client::new()
                .get(format!("{}{}", base_url, path))
                .send()
                .await
                .expect("Failed to make request.");

            let json: Value = assert_envelope(resp, *status).await;
            assert_eq!(json["stack"], Value::Null, "{path} leaked a stack in {mode}");
        }
    }
}

#[tokio::test]
async fn runtime_stack_contains_the_cause_chain() {
    let base_url: String = spawn_app(env("development"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/errors/runtime", base_url))
        .send()
        .await
        .expect("Failed to make request.");

    let json: Value = assert_envelope(resp, 500).await;
    assert!(json["stack"].as_str().unwrap().contains("connection refused"));
}
