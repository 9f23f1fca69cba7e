//! codeassist-service: code completion, debugging and free-form prompts over
//! an ordered chain of Gemini models.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
