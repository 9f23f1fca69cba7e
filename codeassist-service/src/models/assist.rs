use serde::{Deserialize, Serialize};

/// Raw query string pairs in arrival order.
///
/// A repeated key resolves to its first value, so `?q=a&q=b` reads as `a`.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo_suggestion: String,
    pub model_used: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebugResponse {
    pub debug_suggestion: String,
    pub model_used: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub response: String,
    pub model_used: Option<String>,
}
