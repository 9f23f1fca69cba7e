use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

use crate::services::ModelChain;

/// Default fallback chain, highest priority first.
pub const DEFAULT_CANDIDATE_MODELS: &str =
    "gemini-2.5-flash,gemini-2.5-pro,gemini-2.0-flash,gemini-1.5-flash";

/// Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upstream request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct CodeAssistConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// May be empty; an unusable key shows up as failed candidates, not as a
    /// startup error.
    pub api_key: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub candidates: ModelChain,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(format!("Invalid provider: {}", s)),
        }
    }
}

impl GoogleConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl CodeAssistConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = env::var("GEMINI_API").unwrap_or_default();

        let candidates = ModelChain::parse(&get_env(
            "GENAI_CANDIDATE_MODELS",
            Some(DEFAULT_CANDIDATE_MODELS),
            is_prod,
        )?)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(CodeAssistConfig {
            common: common_config,
            google: GoogleConfig {
                api_key,
                api_base: get_env("GENAI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                request_timeout_secs: get_env(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    Some(&DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            models: ModelConfig {
                provider: get_env("GENAI_PROVIDER", Some("gemini"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                candidates,
            },
            cors: CorsConfig {
                allowed_origins: split_list(&get_env("CORS_ALLOWED_ORIGINS", Some("*"), is_prod)?),
            },
        })
    }
}

/// Split a comma-separated setting, dropping blank entries.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod && default.is_none() {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
