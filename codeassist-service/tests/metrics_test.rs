//! Integration tests for the Prometheus series recorded by the service.
//!
//! Kept in its own binary because the recorder is installed process-wide.

mod common;

use codeassist_service::services::init_metrics;
use codeassist_service::services::providers::mock::MockTextProvider;
use codeassist_service::services::providers::ProviderError;
use common::TestApp;
use reqwest::Client;
use std::sync::Arc;

async fn get_text(client: &Client, url: String) -> String {
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());
    response.text().await.expect("Failed to read body")
}

#[tokio::test]
async fn generation_outcomes_are_exported() {
    init_metrics();

    let provider = Arc::new(
        MockTextProvider::new()
            .fail("broken", ProviderError::ApiError("model not found".to_string()))
            .respond_empty("blank")
            .respond("good", "answer"),
    );
    let client = Client::new();

    // broken -> blank -> good
    let app = TestApp::spawn(provider.clone(), &["broken", "blank", "good"]).await;
    get_text(&client, app.url("/prompt?q=hi")).await;

    // broken -> blank, then exhausted
    let exhausted = TestApp::spawn(provider, &["broken", "blank"]).await;
    get_text(&client, exhausted.url("/prompt?q=hi")).await;

    let body = get_text(&client, app.url("/metrics")).await;

    assert!(
        body.contains(r#"genai_attempts_total{model="good",outcome="success"} 1"#),
        "{}",
        body
    );
    assert!(
        body.contains(r#"genai_attempts_total{model="broken",outcome="error"} 2"#),
        "{}",
        body
    );
    assert!(
        body.contains(r#"genai_attempts_total{model="blank",outcome="empty"} 2"#),
        "{}",
        body
    );
    assert!(body.contains("genai_exhausted_total 1"), "{}", body);
    assert!(body.contains("genai_provider_latency_seconds"), "{}", body);
    assert!(body.contains("http_requests_total"), "{}", body);
}
