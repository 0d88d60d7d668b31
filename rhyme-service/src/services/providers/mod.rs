//! External provider abstractions and implementations.
//!
//! Two collaborators sit behind traits so handlers and tests can swap them:
//! a generative text model (Gemini) and a rhymes dictionary (WordsAPI).

pub mod gemini;
pub mod mock;
pub mod words_api;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success HTTP status; `body` is the raw response text.
    #[error("{provider} returned {status}")]
    UpstreamStatus {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl ProviderError {
    /// Short label used for error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::UpstreamStatus { .. } => "upstream_status",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UpstreamStatus { ref body, .. } => AppError::UpstreamFailure {
                message: err.to_string(),
                body: body.clone(),
            },
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Result of a text generation call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Raw text exactly as the model returned it.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,
}

/// Generation parameters for text requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Complete `prompt` and return the free-form reply.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Configuration check; does not call the remote API.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Trait for rhyme dictionaries (e.g., WordsAPI).
#[async_trait]
pub trait RhymesProvider: Send + Sync {
    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Fetch the provider's JSON document describing rhymes of `word`.
    async fn rhymes(&self, word: &str) -> Result<serde_json::Value, ProviderError>;

    /// Configuration check; does not call the remote API.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_becomes_upstream_failure() {
        let err = ProviderError::UpstreamStatus {
            provider: "words_api",
            status: reqwest::StatusCode::NOT_FOUND,
            body: "word not found".to_string(),
        };

        match AppError::from(err) {
            AppError::UpstreamFailure { message, body } => {
                assert_eq!(message, "words_api returned 404 Not Found");
                assert_eq!(body, "word not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_errors_become_internal() {
        let err = AppError::from(ProviderError::NetworkError("connection refused".into()));
        match err {
            AppError::InternalError(cause) => {
                assert_eq!(cause.to_string(), "Network error: connection refused")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
