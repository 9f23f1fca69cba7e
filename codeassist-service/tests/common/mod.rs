#![allow(dead_code)]

use codeassist_service::config::{
    CodeAssistConfig, CorsConfig, GoogleConfig, ModelConfig, ProviderKind,
    DEFAULT_GEMINI_API_BASE,
};
use codeassist_service::services::providers::TextProvider;
use codeassist_service::services::ModelChain;
use codeassist_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub http_address: String,
    pub port: u16,
}

/// Configuration with a random port and the given fallback chain.
pub fn test_config(models: &[&str]) -> CodeAssistConfig {
    CodeAssistConfig {
        common: CoreConfig {
            port: 0,
            ..CoreConfig::default()
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            request_timeout_secs: 5,
        },
        models: ModelConfig {
            provider: ProviderKind::Mock,
            candidates: ModelChain::new(models.iter().map(|m| m.to_string()).collect())
                .expect("test chain must not be empty"),
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

impl TestApp {
    pub async fn spawn(provider: Arc<dyn TextProvider>, models: &[&str]) -> Self {
        Self::spawn_with_config(test_config(models), provider).await
    }

    pub async fn spawn_with_config(
        config: CodeAssistConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Self {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let http_address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { http_address, port }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.http_address, path_and_query)
    }
}
