//! Sequential model fallback.
//!
//! [`FallbackGenerator`] tries one prompt against each model of a
//! [`ModelChain`] in priority order and returns the first non-empty answer.
//! Failures of individual candidates are logged and skipped; only total
//! exhaustion reaches the caller.

use super::metrics;
use super::providers::{ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Text returned when every candidate has failed.
pub const ALL_MODELS_FAILED: &str =
    "❌ All models failed to generate a response. Please try again later.";

/// The candidate model list was empty.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("candidate model list must not be empty")]
pub struct EmptyModelChain;

/// Ordered, non-empty list of model identifiers, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChain(Vec<String>);

impl ModelChain {
    pub fn new(models: Vec<String>) -> Result<Self, EmptyModelChain> {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        if models.is_empty() {
            return Err(EmptyModelChain);
        }
        Ok(Self(models))
    }

    /// Parse a comma-separated list such as `"gemini-2.5-flash,gemini-2.5-pro"`.
    pub fn parse(raw: &str) -> Result<Self, EmptyModelChain> {
        Self::new(crate::config::split_list(raw))
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Generated text and the model that produced it.
///
/// `model_used` is `None` only for the exhaustion payload built by
/// [`FallbackGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub model_used: Option<String>,
}

impl Generation {
    fn exhausted() -> Self {
        Self {
            text: ALL_MODELS_FAILED.to_string(),
            model_used: None,
        }
    }
}

/// One failed candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub model: String,
    pub cause: ProviderError,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("all {} candidate models failed", .attempts.len())]
    Exhausted { attempts: Vec<AttemptFailure> },
}

/// Runs prompts through the fallback chain.
pub struct FallbackGenerator {
    provider: Arc<dyn TextProvider>,
    chain: ModelChain,
}

impl FallbackGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, chain: ModelChain) -> Self {
        Self { provider, chain }
    }

    /// Try each candidate in order, stopping at the first non-empty answer.
    pub async fn try_generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        let mut attempts = Vec::new();

        for model in self.chain.iter() {
            let start = Instant::now();
            let result = self.provider.generate(model, prompt).await;
            metrics::record_provider_latency(self.provider.name(), model, start.elapsed());

            let cause = match result {
                Ok(text) if !text.trim().is_empty() => {
                    metrics::record_attempt(model, "success");
                    tracing::info!(
                        model = %model,
                        failed_before = attempts.len(),
                        "Generation succeeded"
                    );
                    return Ok(Generation {
                        text,
                        model_used: Some(model.to_string()),
                    });
                }
                Ok(_) => ProviderError::EmptyResponse,
                Err(e) => e,
            };

            metrics::record_attempt(
                model,
                if cause == ProviderError::EmptyResponse {
                    "empty"
                } else {
                    "error"
                },
            );
            tracing::warn!(
                provider = self.provider.name(),
                model = %model,
                error = %cause,
                "Candidate model failed, trying next"
            );
            attempts.push(AttemptFailure {
                model: model.to_string(),
                cause,
            });
        }

        metrics::record_exhausted();
        tracing::error!(attempts = attempts.len(), "All candidate models failed");
        Err(GenerationError::Exhausted { attempts })
    }

    /// Like [`Self::try_generate`], but exhaustion becomes the fixed failure
    /// text with no model id.
    pub async fn generate(&self, prompt: &str) -> Generation {
        self.try_generate(prompt)
            .await
            .unwrap_or_else(|_| Generation::exhausted())
    }
}
