//! Mock provider implementations for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, RhymesProvider, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Mock text provider that replies with a fixed text, or fails when `reply` is `None`.
pub struct MockTextProvider {
    reply: Option<String>,
    calls: AtomicU64,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicU64::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// A provider whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicU64::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|prompt| prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        match &self.reply {
            Some(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: 1,
            }),
            None => Err(ProviderError::NetworkError(
                "mock text provider unavailable".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// What the mock rhymes provider answers with.
#[derive(Debug, Clone)]
pub enum MockRhymesReply {
    Document(serde_json::Value),
    Status { status: u16, body: String },
}

/// Mock rhymes provider returning a fixed document or status.
pub struct MockRhymesProvider {
    reply: MockRhymesReply,
    calls: AtomicU64,
    last_word: Mutex<Option<String>>,
}

impl MockRhymesProvider {
    pub fn new(reply: MockRhymesReply) -> Self {
        Self {
            reply,
            calls: AtomicU64::new(0),
            last_word: Mutex::new(None),
        }
    }

    pub fn with_document(document: serde_json::Value) -> Self {
        Self::new(MockRhymesReply::Document(document))
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_word(&self) -> Option<String> {
        self.last_word
            .lock()
            .map(|word| word.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RhymesProvider for MockRhymesProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn rhymes(&self, word: &str) -> Result<serde_json::Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_word.lock() {
            *last = Some(word.to_string());
        }

        match &self.reply {
            MockRhymesReply::Document(doc) => Ok(doc.clone()),
            MockRhymesReply::Status { status, body } => Err(ProviderError::UpstreamStatus {
                provider: "mock",
                status: reqwest::StatusCode::from_u16(*status)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
                body: body.clone(),
            }),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
