//! AI configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "google/gemma-3n-e4b-it:free";

/// Default `HTTP-Referer` header identifying the app to OpenRouter.
pub const DEFAULT_REFERER: &str = "https://smartchefai.netlify.app/";

/// Default `X-Title` header.
pub const DEFAULT_TITLE: &str = "SmartChef Recipe Generator";

/// Delay applied before answering with mock recipes after a failed call.
pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 1500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// AI client and pipeline configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for OpenRouter. None means the remote model is never called.
    pub api_key: Option<String>,
    /// Model name (e.g., "google/gemma-3n-e4b-it:free").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Value of the `HTTP-Referer` header.
    pub referer: String,
    /// Value of the `X-Title` header.
    pub title: String,
    /// If true, skip the remote model and answer with mock recipes.
    pub offline: bool,
    /// Delay before answering with mock recipes after a failed call.
    pub fallback_delay: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            offline: false,
            fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
        }
    }
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter (absent means offline)
    /// - `SMARTCHEF_AI_MODEL`: Model name (default: "google/gemma-3n-e4b-it:free")
    /// - `SMARTCHEF_AI_BASE_URL`: API base URL (default: "https://openrouter.ai/api/v1")
    /// - `SMARTCHEF_AI_REFERER`: `HTTP-Referer` header value
    /// - `SMARTCHEF_AI_TITLE`: `X-Title` header value
    /// - `SMARTCHEF_OFFLINE`: Always use mock recipes (default: false)
    /// - `SMARTCHEF_FALLBACK_DELAY_MS`: Fallback delay in ms (default: 1500)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model = env::var("SMARTCHEF_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("SMARTCHEF_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let referer =
            env::var("SMARTCHEF_AI_REFERER").unwrap_or_else(|_| DEFAULT_REFERER.to_string());

        let title = env::var("SMARTCHEF_AI_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string());

        let offline = env::var("SMARTCHEF_OFFLINE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let fallback_delay_ms = match env::var("SMARTCHEF_FALLBACK_DELAY_MS") {
            Ok(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SMARTCHEF_FALLBACK_DELAY_MS".to_string(),
                value: v.clone(),
            })?,
            Err(_) => DEFAULT_FALLBACK_DELAY_MS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            referer,
            title,
            offline,
            fallback_delay: Duration::from_millis(fallback_delay_ms),
        })
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Require an API key, for callers that must talk to the remote model.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let config = AiConfig {
            base_url: "http://localhost:8080/api/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.fallback_delay, Duration::from_millis(1500));
        assert!(config.require_api_key().is_err());
    }
}
