//! Chat-completions client for persona inference
//!
//! The session driver talks to the model through the [`ChatProvider`]
//! trait; [`GroqClient`] is the default implementation, posting to Groq's
//! `OpenAI`-compatible endpoint.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::prompt::ChatMessage;
use crate::{Error, Result};

/// Default chat model
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Groq `OpenAI`-compatible chat completions endpoint
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Sampling temperature; creative but predictable
const TEMPERATURE: f64 = 0.7;

/// Cap on generated response length
const MAX_COMPLETION_TOKENS: u32 = 150;

/// Abstraction over the chat-completions backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate the next persona response for the given message list
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Groq chat-completions client
pub struct GroqClient {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GroqClient {
    /// Create a client for the given model
    #[must_use]
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: GROQ_API_URL.to_string(),
        }
    }

    /// Override the endpoint URL (test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("api error: {status} - {body}")));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("failed to parse response: {e}")))?;

        result
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::Llm("empty completion".to_string()))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
