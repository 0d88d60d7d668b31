//! Rhyme lookup backed by an external dictionary.

use crate::models::RhymeResult;
use crate::services::metrics;
use crate::services::providers::RhymesProvider;
use serde_json::Value;
use service_core::error::AppError;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;
use validator::{Validate, ValidationError, ValidationErrors};

pub const WORD_REQUIRED_MESSAGE: &str = "Word parameter is required.";

#[derive(Clone)]
pub struct RhymeLookup {
    provider: Arc<dyn RhymesProvider>,
}

impl RhymeLookup {
    pub fn new(provider: Arc<dyn RhymesProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn RhymesProvider> {
        &self.provider
    }

    /// Look up rhymes for `word`, which is trimmed and lower-cased first.
    ///
    /// A blank word is rejected before any outbound call.
    pub async fn lookup(&self, word: &str) -> Result<RhymeResult, AppError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(WORD_REQUIRED_MESSAGE)));
        }

        let provider_name = self.provider.name();
        let start = Instant::now();
        let document = self.provider.rhymes(&word).await;
        metrics::record_provider_latency(provider_name, start.elapsed().as_secs_f64());

        let document = document.map_err(|e| {
            metrics::record_provider_error(provider_name, e.kind());
            tracing::error!(
                provider = provider_name,
                word = %word,
                error = %e,
                "Rhymes provider call failed"
            );
            e
        })?;

        let rhymes = extract_rhymes(&document)?;
        let result = RhymeResult::new(word, rhymes);
        result.validate()?;

        tracing::info!(
            word = %result.word,
            rhyme_count = result.rhymes.len(),
            "Looked up rhymes"
        );

        Ok(result)
    }
}

/// Read `rhymes.all` from a WordsAPI document.
///
/// Any missing level yields an empty list; a present value that is not a list
/// of strings is a schema mismatch.
pub fn extract_rhymes(document: &Value) -> Result<Vec<String>, ValidationErrors> {
    let all = match document.get("rhymes").and_then(|rhymes| rhymes.get("all")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(all) => all,
    };

    all.as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| {
            let mut err = ValidationError::new("type");
            err.message = Some(Cow::from("Rhymes must be a list of strings"));
            let mut errors = ValidationErrors::new();
            errors.add("rhymes", err);
            errors
        })
}
