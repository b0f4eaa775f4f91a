//! LLM Client — the single point of entry for all OpenAI calls.
//!
//! No other module talks to the provider directly. The gateway depends on the
//! `CompletionProvider` trait so tests can substitute a stub.
//!
//! Model: gpt-4o-mini (hardcoded, do not make configurable)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

#[cfg(test)]
pub mod stub;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// The model used for every completion.
pub const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 1000;
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

/// Tagged outcome of a failed provider call. The gateway branches on the
/// variant; it never inspects message text.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Provider quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("Provider rejected credentials (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Something that turns a prompt into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns `Ok(None)` when the provider answered with no content.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if it carries any non-empty content.
    pub fn text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
    code: Option<String>,
}

/// Client for the OpenAI chat completions endpoint. No retries: every failure
/// is classified and returned on the first attempt.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::Http)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Makes one call to the chat completions API.
    pub async fn call(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| self.transport_error(e))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(e)
        }
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<Option<String>, LlmError> {
        Ok(self.call(prompt, temperature).await?.text())
    }
}

/// Maps a non-2xx provider response onto an `LlmError` variant.
/// 429 and an `insufficient_quota` code both count as quota exhaustion.
fn classify_failure(status: StatusCode, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<OpenAiError>(body).ok();
    let quota_code = parsed
        .as_ref()
        .and_then(|e| e.error.code.as_deref())
        .is_some_and(|code| code == INSUFFICIENT_QUOTA);
    let message = parsed
        .map(|e| e.error.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::QuotaExceeded(message),
        _ if quota_code => LlmError::QuotaExceeded(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
