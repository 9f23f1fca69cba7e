//! Request and response shapes for the assist endpoints.

pub mod assist;
pub mod prompt;

pub use assist::{DebugResponse, HomeResponse, PromptResponse, QueryParams, TodoResponse};
pub use prompt::{debug_prompt, todo_prompt};
