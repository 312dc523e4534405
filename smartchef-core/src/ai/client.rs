//! AI client implementation using OpenRouter (OpenAI-compatible API).

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use super::config::{AiConfig, ConfigError};
use super::types::{
    ApiErrorEnvelope, ChatRequest, ChatResponse, CompletionBody, CompletionEnvelope,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("API request failed: {0}")]
    Network(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Remote model disabled (offline mode or no API key)")]
    Offline,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

/// Trait for AI clients.
///
/// Implementations perform exactly one remote call per `complete` and never
/// retry; fallback policy lives in the caller.
#[async_trait]
pub trait AiClient: Send + Sync + fmt::Debug {
    /// Complete a chat request.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError>;

    /// Model name, for logging.
    fn model_name(&self) -> &str;
}

/// Create the client described by the configuration.
///
/// Without an API key, or with offline mode set, this is an [`OfflineClient`].
pub fn client_from_config(config: &AiConfig) -> Result<Box<dyn AiClient>, ConfigError> {
    if config.offline {
        return Ok(Box::new(OfflineClient));
    }
    match config.api_key {
        Some(_) => Ok(Box::new(OpenRouterClient::new(config.clone())?)),
        None => {
            tracing::warn!(
                "OPENROUTER_API_KEY not set, recipes will come from the offline generator"
            );
            Ok(Box::new(OfflineClient))
        }
    }
}

/// Chat completion client for OpenRouter.
#[derive(Debug)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    config: AiConfig,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration. Requires an API key.
    pub fn new(config: AiConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            config,
        })
    }
}

#[async_trait]
impl AiClient for OpenRouterClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        let body = CompletionBody {
            model: &self.config.model,
            request: &request,
        };

        tracing::debug!(model = %self.config.model, "Calling AI API");

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let text = response.text().await?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AiError::Api { status, message });
        }

        let envelope: CompletionEnvelope =
            serde_json::from_str(&text).map_err(|e| AiError::ParseError(e.to_string()))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::ParseError("No message content in response".to_string()))?;

        Ok(ChatResponse {
            content,
            usage: envelope.usage.unwrap_or_default(),
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Client that never reaches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineClient;

#[async_trait]
impl AiClient for OfflineClient {
    async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, AiError> {
        Err(AiError::Offline)
    }

    fn model_name(&self) -> &str {
        "offline"
    }
}
