//! Integration tests for `/todo`, `/debug` and `/prompt`.

mod common;

use codeassist_service::services::providers::mock::MockTextProvider;
use codeassist_service::services::providers::ProviderError;
use codeassist_service::services::ALL_MODELS_FAILED;
use common::{test_config, TestApp};
use reqwest::{Client, StatusCode};
use std::sync::Arc;

async fn get_json(app: &TestApp, path_and_query: &str) -> (StatusCode, serde_json::Value) {
    let response = Client::new()
        .get(app.url(path_and_query))
        .send()
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

// =============================================================================
// Parameter validation
// =============================================================================

#[tokio::test]
async fn missing_parameter_is_rejected_on_every_route() {
    let provider = Arc::new(MockTextProvider::new());
    let app = TestApp::spawn(provider.clone(), &["a"]).await;

    for (path, param) in [("/todo", "code"), ("/debug", "code"), ("/prompt", "q")] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(
            body["error"],
            format!("❌ Please provide '{}' query param", param)
        );
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn empty_parameter_counts_as_missing() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let (status, body) = get_json(&app, "/todo?code=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn wrong_parameter_name_is_rejected() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let (status, body) = get_json(&app, "/prompt?code=hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "❌ Please provide 'q' query param");
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn todo_with_healthy_backends_uses_first_candidate() {
    let provider = Arc::new(MockTextProvider::new());
    let app = TestApp::spawn(
        provider.clone(),
        &["gemini-2.5-flash", "gemini-2.5-pro"],
    )
    .await;

    let (status, body) = get_json(&app, "/todo?code=function+add(a,b){//TODO}").await;

    assert_eq!(status, StatusCode::OK);
    let suggestion = body["todo_suggestion"].as_str().unwrap();
    assert!(!suggestion.is_empty());
    assert!(suggestion.contains("function add(a,b){//TODO}"));
    assert!(suggestion.contains("complete the TODOs"));
    assert_eq!(body["model_used"], "gemini-2.5-flash");
    assert_eq!(provider.calls(), vec!["gemini-2.5-flash".to_string()]);
}

#[tokio::test]
async fn debug_wraps_code_in_debug_template() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let (status, body) = get_json(&app, "/debug?code=x%3D1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["debug_suggestion"],
        "Mock response from a for: Debug and fix issues in this code:\n\nx=1"
    );
    assert_eq!(body["model_used"], "a");
}

#[tokio::test]
async fn prompt_is_forwarded_unmodified() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let (status, body) = get_json(&app, "/prompt?q=What+is+Rust%3F").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Mock response from a for: What is Rust?");
    assert_eq!(body["model_used"], "a");
}

#[tokio::test]
async fn repeated_parameter_uses_first_value() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let (status, body) = get_json(&app, "/prompt?q=first&q=second").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Mock response from a for: first");

    let (status, body) = get_json(&app, "/debug?code=x&code=y").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["debug_suggestion"],
        "Mock response from a for: Debug and fix issues in this code:\n\nx"
    );
}

#[tokio::test]
async fn falls_back_to_next_candidate() {
    let provider = Arc::new(
        MockTextProvider::new()
            .fail("A", ProviderError::ApiError("model not found".to_string()))
            .respond("B", "X")
            .respond("C", "unused"),
    );
    let app = TestApp::spawn(provider.clone(), &["A", "B", "C"]).await;

    let (status, body) = get_json(&app, "/prompt?q=hi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "X");
    assert_eq!(body["model_used"], "B");
    assert_eq!(provider.calls(), vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn exhausted_chain_is_a_soft_failure() {
    let provider = Arc::new(
        MockTextProvider::new()
            .fail("A", ProviderError::RateLimited)
            .respond_empty("B"),
    );
    let app = TestApp::spawn(provider, &["A", "B"]).await;

    for (path, key) in [
        ("/todo?code=x", "todo_suggestion"),
        ("/debug?code=x", "debug_suggestion"),
        ("/prompt?q=x", "response"),
    ] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body[key], ALL_MODELS_FAILED);
        assert!(body["model_used"].is_null());
    }
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let response = Client::new()
        .get(app.url("/prompt?q=hi"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new()), &["a"]).await;

    let response = Client::new()
        .get(app.url("/"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn cors_restricts_to_configured_origins() {
    let mut config = test_config(&["a"]);
    config.cors.allowed_origins = vec!["http://allowed.test".to_string()];
    let app = TestApp::spawn_with_config(config, Arc::new(MockTextProvider::new())).await;

    let allowed = Client::new()
        .get(app.url("/"))
        .header("origin", "http://allowed.test")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://allowed.test"
    );

    let denied = Client::new()
        .get(app.url("/"))
        .header("origin", "http://other.test")
        .send()
        .await
        .expect("Failed to execute request");
    assert!(denied
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
