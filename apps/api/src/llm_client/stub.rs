//! Scripted `CompletionProvider` for tests that must not hit the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionProvider, LlmError};

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Empty,
    Quota,
    Unauthorized(u16),
    Api(u16, String),
    Timeout,
}

pub struct StubProvider {
    reply: StubReply,
    calls: AtomicUsize,
    temperatures: Mutex<Vec<f32>>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            temperatures: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.temperatures.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<Option<String>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.temperatures.lock().unwrap().push(temperature);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.reply {
            StubReply::Text(text) => Ok(Some(text.clone())),
            StubReply::Empty => Ok(None),
            StubReply::Quota => Err(LlmError::QuotaExceeded(
                "You exceeded your current quota".to_string(),
            )),
            StubReply::Unauthorized(status) => Err(LlmError::Unauthorized {
                status: *status,
                message: "Incorrect API key provided".to_string(),
            }),
            StubReply::Api(status, message) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            StubReply::Timeout => Err(LlmError::Timeout(Duration::from_secs(30))),
        }
    }
}
