//! HTTP handlers for the codeassist service.

pub mod assist;
pub mod health;

pub use assist::{debug_route, prompt_route, todo_route};
pub use health::{health_check, home, metrics_endpoint};
