//! Text generation backends.
//!
//! A provider invokes one named model with a prompt. The fallback chain in
//! [`crate::services::generation`] decides which names to try and in what
//! order; providers know nothing about it.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Invoke a generative-text backend by model name.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Generate a completion for `prompt` with the model `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}
