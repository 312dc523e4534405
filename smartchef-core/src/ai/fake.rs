//! Fake AI client for testing.
//!
//! Returns canned replies matched against the prompt, so the pipeline can be
//! exercised without network access or API costs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client.
///
/// Replies are matched by checking if the prompt contains a registered
/// substring (case-insensitive). Unmatched prompts get the default reply, or
/// a network error if none is set.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    /// Prompt substring -> reply, checked in insertion order.
    replies: RwLock<Vec<(String, Result<String, AiError>)>>,
    default_reply: Option<Result<String, AiError>>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `content` for prompts containing `prompt_contains`.
    pub fn with_response(prompt_contains: &str, content: &str) -> Self {
        let client = Self::new();
        client.add_reply(prompt_contains, Ok(content.to_string()));
        client
    }

    /// Reply with `content` to every prompt.
    pub fn always(content: &str) -> Self {
        Self::new().with_default_reply(Ok(content.to_string()))
    }

    /// Fail every prompt with `error`.
    pub fn failing(error: AiError) -> Self {
        Self::new().with_default_reply(Err(error))
    }

    pub fn add_reply(&self, prompt_contains: &str, reply: Result<String, AiError>) {
        if let Ok(mut replies) = self.replies.write() {
            replies.push((prompt_contains.to_lowercase(), reply));
        }
    }

    pub fn with_default_reply(mut self, reply: Result<String, AiError>) -> Self {
        self.default_reply = Some(reply);
        self
    }

    /// Sleep this long before replying.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of completed or in-progress calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, prompt: &str) -> Result<String, AiError> {
        let prompt_lower = prompt.to_lowercase();
        if let Ok(replies) = self.replies.read() {
            if let Some((_, reply)) = replies
                .iter()
                .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            {
                return reply.clone();
            }
        }

        match &self.default_reply {
            Some(reply) => reply.clone(),
            None => Err(AiError::Network(format!(
                "FakeAiClient: no reply configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let content = self.lookup(request.user_prompt().unwrap_or_default())?;
        Ok(ChatResponse {
            content,
            usage: Usage::default(),
        })
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
