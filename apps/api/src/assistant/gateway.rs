//! Completion Gateway: turns a validated input into response text.
//!
//! Flow: build prompt → provider call → on quota exhaustion, demo response.
//! Auth failures and every other provider failure are returned to the caller.
//! Credential checks happen in the constructor, not on first use.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::assistant::demo::demo_response;
use crate::assistant::prompts::{build_assistant_prompt, EMPTY_COMPLETION_FALLBACK};
use crate::llm_client::{CompletionProvider, LlmClient, LlmError};
use crate::models::task::TaskType;

/// Value shipped in `.env.example`; treated the same as an unset key.
const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";
const INPUT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    ProviderAuth(String),

    #[error("AI Service Error: {0}")]
    Provider(String),

    #[error("OpenAI API key is required but not configured. Please add your API key.")]
    Configuration,
}

/// Everything the gateway needs to reach the provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Serve demo responses instead of failing when no usable key is set.
    pub demo_without_api_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Live,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub task_type: TaskType,
    pub source: ResponseSource,
}

enum ProviderAccess {
    Live(Arc<dyn CompletionProvider>),
    DemoOnly,
    Unconfigured,
}

pub struct CompletionGateway {
    access: ProviderAccess,
}

impl CompletionGateway {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, LlmError> {
        let access = match usable_api_key(config.api_key.as_deref()) {
            Some(key) => {
                let client = LlmClient::new(key.to_string(), &config.base_url, config.timeout)?;
                ProviderAccess::Live(Arc::new(client))
            }
            None if config.demo_without_api_key => ProviderAccess::DemoOnly,
            None => ProviderAccess::Unconfigured,
        };
        Ok(Self { access })
    }

    /// Gateway backed by an arbitrary provider.
    #[cfg(test)]
    pub fn with_provider(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            access: ProviderAccess::Live(provider),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.access, ProviderAccess::Live(_))
    }

    /// Short label for startup logging.
    pub fn mode(&self) -> &'static str {
        match self.access {
            ProviderAccess::Live(_) => "live",
            ProviderAccess::DemoOnly => "demo (no API key)",
            ProviderAccess::Unconfigured => "unconfigured (no API key)",
        }
    }

    /// Produces a response for an already-validated input.
    pub async fn complete(
        &self,
        input: &str,
        task_type: TaskType,
    ) -> Result<Completion, GatewayError> {
        let provider = match &self.access {
            ProviderAccess::Live(provider) => provider,
            ProviderAccess::DemoOnly => {
                info!("No API key configured, serving demo {task_type} response");
                return Ok(demo_completion(input, task_type));
            }
            ProviderAccess::Unconfigured => return Err(GatewayError::Configuration),
        };

        let preview: String = input.chars().take(INPUT_PREVIEW_CHARS).collect();
        info!("Processing {task_type} request: {preview}...");

        let prompt = build_assistant_prompt(input);
        match provider.complete(&prompt, task_type.temperature()).await {
            Ok(text) => {
                info!("Successfully generated response for {task_type} request");
                Ok(Completion {
                    text: text.unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string()),
                    task_type,
                    source: ResponseSource::Live,
                })
            }
            Err(LlmError::QuotaExceeded(message)) => {
                warn!("Provider quota exhausted ({message}), falling back to demo response");
                Ok(demo_completion(input, task_type))
            }
            Err(LlmError::Unauthorized { status, message }) => {
                error!("Provider rejected credentials (status {status}): {message}");
                Err(GatewayError::ProviderAuth(auth_message(status)))
            }
            Err(e) => {
                error!("Provider call failed: {e}");
                Err(GatewayError::Provider(e.to_string()))
            }
        }
    }
}

fn demo_completion(input: &str, task_type: TaskType) -> Completion {
    Completion {
        text: demo_response(input, task_type),
        task_type,
        source: ResponseSource::Demo,
    }
}

fn auth_message(status: u16) -> String {
    if status == 403 {
        "OpenAI API access forbidden. Please verify your API key permissions.".to_string()
    } else {
        "Invalid OpenAI API key. Please check your API key is correct and active.".to_string()
    }
}

/// Returns the key unless it is missing, blank, or the placeholder.
fn usable_api_key(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::demo::{DEMO_PREFIX, PARIS_ANSWER};
    use crate::llm_client::stub::{StubProvider, StubReply};

    fn gateway(reply: StubReply) -> (CompletionGateway, Arc<StubProvider>) {
        let stub = Arc::new(StubProvider::new(reply));
        (CompletionGateway::with_provider(stub.clone()), stub)
    }

    fn config(api_key: Option<&str>, demo_without_api_key: bool) -> GatewayConfig {
        GatewayConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
            demo_without_api_key,
        }
    }

    #[test]
    fn test_usable_api_key() {
        assert_eq!(usable_api_key(Some("sk-real")), Some("sk-real"));
        assert_eq!(usable_api_key(None), None);
        assert_eq!(usable_api_key(Some("   ")), None);
        assert_eq!(usable_api_key(Some(PLACEHOLDER_API_KEY)), None);
    }

    #[tokio::test]
    async fn test_live_text_is_returned_verbatim() {
        let (gw, stub) = gateway(StubReply::Text("  Paris!  ".into()));
        let out = gw
            .complete("[question] capital?", TaskType::Question)
            .await
            .unwrap();
        assert_eq!(out.text, "  Paris!  ");
        assert_eq!(out.task_type, TaskType::Question);
        assert_eq!(out.source, ResponseSource::Live);
        assert_eq!(stub.calls(), 1);
        assert!(stub
            .last_prompt()
            .unwrap()
            .ends_with("User: [question] capital?"));
    }

    #[tokio::test]
    async fn test_temperature_follows_task_type() {
        let (gw, stub) = gateway(StubReply::Text("ok".into()));
        gw.complete("[creative] robot", TaskType::Creative)
            .await
            .unwrap();
        gw.complete("[summary] text", TaskType::Summary)
            .await
            .unwrap();
        assert_eq!(stub.temperatures(), vec![0.8, 0.3]);
    }

    #[tokio::test]
    async fn test_empty_content_uses_fallback_string() {
        let (gw, _) = gateway(StubReply::Empty);
        let out = gw.complete("[advice] x", TaskType::Advice).await.unwrap();
        assert_eq!(out.text, EMPTY_COMPLETION_FALLBACK);
        assert_eq!(out.source, ResponseSource::Live);
    }

    #[tokio::test]
    async fn test_quota_failure_serves_canned_paris_answer() {
        let (gw, _) = gateway(StubReply::Quota);
        let out = gw
            .complete("[question] What is the capital of France?", TaskType::Question)
            .await
            .unwrap();
        assert_eq!(out.text, format!("{DEMO_PREFIX}{PARIS_ANSWER}"));
        assert_eq!(out.source, ResponseSource::Demo);
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error_without_fallback() {
        let (gw, _) = gateway(StubReply::Unauthorized(401));
        let err = gw
            .complete("[question] x", TaskType::Question)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ProviderAuth(ref m) if m.contains("Invalid OpenAI API key")));

        let (gw, _) = gateway(StubReply::Unauthorized(403));
        let err = gw
            .complete("[question] x", TaskType::Question)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ProviderAuth(ref m) if m.contains("forbidden")));
    }

    #[tokio::test]
    async fn test_other_failures_wrap_provider_message() {
        let (gw, _) = gateway(StubReply::Api(500, "model overloaded".into()));
        let err = gw
            .complete("[summary] x", TaskType::Summary)
            .await
            .unwrap_err();
        match err {
            GatewayError::Provider(msg) => assert!(msg.contains("model overloaded")),
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_provider_error() {
        let (gw, _) = gateway(StubReply::Timeout);
        let err = gw
            .complete("[summary] x", TaskType::Summary)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Provider(_)));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let gw = CompletionGateway::from_config(&config(None, false)).unwrap();
        assert_eq!(gw.mode(), "unconfigured (no API key)");
        let err = gw
            .complete("[question] x", TaskType::Question)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Configuration));
    }

    #[tokio::test]
    async fn test_placeholder_key_with_demo_flag_serves_demo() {
        let gw = CompletionGateway::from_config(&config(Some(PLACEHOLDER_API_KEY), true)).unwrap();
        let out = gw
            .complete("[question] What is the capital of France?", TaskType::Question)
            .await
            .unwrap();
        assert_eq!(out.source, ResponseSource::Demo);
        assert_eq!(out.text, format!("{DEMO_PREFIX}{PARIS_ANSWER}"));
    }

    #[test]
    fn test_real_key_builds_live_gateway() {
        let gw = CompletionGateway::from_config(&config(Some("sk-live"), false)).unwrap();
        assert!(gw.is_live());
        assert_eq!(gw.mode(), "live");
    }
}
