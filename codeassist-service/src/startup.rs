//! Application startup and lifecycle management.
//!
//! Builds the provider and fallback chain from configuration, wires the HTTP
//! router with the shared middleware stack and owns the bound listener.

use crate::config::{CodeAssistConfig, CorsConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::{FallbackGenerator, TextProvider};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CodeAssistConfig,
    pub generator: Arc<FallbackGenerator>,
}

/// Build the provider selected by `GENAI_PROVIDER`.
fn build_provider(config: &CodeAssistConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    match config.models.provider {
        ProviderKind::Gemini => {
            if config.google.api_key.is_empty() {
                tracing::warn!("GEMINI_API is not set; every Gemini candidate will fail");
            }
            let provider = GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                api_base: config.google.api_base.clone(),
                timeout: config.google.request_timeout(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock text provider; no upstream calls will be made");
            Ok(Arc::new(MockTextProvider::new()))
        }
    }
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    if cors.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    layer.allow_origin(
        cors.allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>(),
    )
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(handlers::home))
        .route("/todo", get(handlers::todo_route))
        .route("/debug", get(handlers::debug_route))
        .route("/prompt", get(handlers::prompt_route))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    path = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the provider named in the configuration.
    pub async fn build(config: CodeAssistConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an explicit provider.
    pub async fn build_with_provider(
        config: CodeAssistConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        tracing::info!(
            provider = provider.name(),
            candidates = ?config.models.candidates,
            "Initialized fallback chain"
        );

        let generator = Arc::new(FallbackGenerator::new(
            provider,
            config.models.candidates.clone(),
        ));
        let state = AppState {
            config: config.clone(),
            generator,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Codeassist service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state)).await
    }

    /// Run the application until `signal` resolves, then drain in-flight
    /// requests.
    pub async fn run_with_graceful_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(signal)
            .await
    }
}
