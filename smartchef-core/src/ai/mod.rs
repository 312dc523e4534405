//! AI client module for LLM integration via OpenRouter.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `OpenRouterClient` for the OpenRouter chat completions endpoint
//! - `OfflineClient` and `FakeAiClient` for offline use and tests
//! - Configuration via environment variables
//! - Prompt templates
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (optional): Your OpenRouter API key; without it
//!   every request is answered by the offline recipe generator
//! - `SMARTCHEF_AI_MODEL` (optional): Model name
//! - `SMARTCHEF_AI_BASE_URL` (optional): API base URL
//! - `SMARTCHEF_OFFLINE` (optional): Set to "true" to skip the remote model
//! - `SMARTCHEF_FALLBACK_DELAY_MS` (optional): Delay before offline answers
//!
//! # Example
//!
//! ```ignore
//! use smartchef_core::ai::{client_from_config, AiConfig, ChatMessage, ChatRequest};
//!
//! let client = client_from_config(&AiConfig::from_env()?)?;
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//!
//! let response = client.complete(request).await?;
//! println!("Response: {}", response.content);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod types;

pub use client::{client_from_config, AiClient, AiError, OfflineClient, OpenRouterClient};
pub use config::{
    AiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_FALLBACK_DELAY_MS, DEFAULT_MODEL,
    DEFAULT_REFERER, DEFAULT_TITLE,
};
pub use fake::FakeAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
