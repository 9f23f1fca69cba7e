//! Mock provider implementation for testing and local runs.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Most recent calls kept in the log; older entries are dropped.
pub const MAX_RECORDED_CALLS: usize = 256;

/// Scripted outcome for one model.
#[derive(Debug, Clone)]
enum Outcome {
    Respond(String),
    Fail(ProviderError),
}

/// Mock text provider.
///
/// Models without a scripted outcome echo the prompt. The latest
/// [`MAX_RECORDED_CALLS`] calls are recorded so tests can assert which
/// candidates were tried and in what order.
#[derive(Default)]
pub struct MockTextProvider {
    outcomes: HashMap<String, Outcome>,
    calls: Mutex<VecDeque<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `model` answer with `text`.
    pub fn respond(mut self, model: &str, text: &str) -> Self {
        self.outcomes
            .insert(model.to_string(), Outcome::Respond(text.to_string()));
        self
    }

    /// Make `model` fail with `error`.
    pub fn fail(mut self, model: &str, error: ProviderError) -> Self {
        self.outcomes.insert(model.to_string(), Outcome::Fail(error));
        self
    }

    /// Make `model` answer with blank text.
    pub fn respond_empty(self, model: &str) -> Self {
        self.respond(model, "")
    }

    /// Models attempted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            if calls.len() == MAX_RECORDED_CALLS {
                calls.pop_front();
            }
            calls.push_back(model.to_string());
        }

        match self.outcomes.get(model) {
            Some(Outcome::Respond(text)) => Ok(text.clone()),
            Some(Outcome::Fail(error)) => Err(error.clone()),
            None => Ok(format!("Mock response from {} for: {}", model, prompt)),
        }
    }
}
