//! Random word generation backed by a text model.

use crate::models::{Difficulty, WordResult};
use crate::services::metrics;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// Asks a text model for one English word whose rhymes match a difficulty tier.
#[derive(Clone)]
pub struct WordGenerator {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl WordGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, temperature: f32) -> Self {
        Self {
            provider,
            params: GenerationParams {
                temperature: Some(temperature),
                max_tokens: None,
            },
        }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Every call is independent; repeated calls may return the same word.
    pub async fn generate(&self, difficulty: Difficulty) -> Result<WordResult, AppError> {
        let prompt = build_prompt(difficulty);
        let provider_name = self.provider.name();

        let start = Instant::now();
        let response = self.provider.generate(&prompt, &self.params).await;
        metrics::record_provider_latency(provider_name, start.elapsed().as_secs_f64());

        let response = response.map_err(|e| {
            metrics::record_provider_error(provider_name, e.kind());
            tracing::error!(
                provider = provider_name,
                difficulty = %difficulty,
                error = %e,
                "Text provider call failed"
            );
            e
        })?;

        let word = extract_word(&response.text);
        if word.is_empty() {
            let err = ProviderError::EmptyResponse;
            metrics::record_provider_error(provider_name, err.kind());
            tracing::warn!(
                difficulty = %difficulty,
                raw_reply = %response.text,
                "Model reply contained no word"
            );
            return Err(err.into());
        }

        let result = WordResult::new(word);
        result.validate().map_err(|e| {
            tracing::warn!(
                difficulty = %difficulty,
                raw_reply = %response.text,
                "Model reply did not yield a valid word"
            );
            e
        })?;

        tracing::info!(
            difficulty = %difficulty,
            word = %result.word,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Generated random word"
        );

        Ok(result)
    }
}

/// Instruction sent to the model, with one calibration line per tier.
pub fn build_prompt(difficulty: Difficulty) -> String {
    format!(
        "Generate one English word based on difficulty level '{}'.\n\
         - Easy: many rhymes (e.g., cat, day)\n\
         - Medium: moderate rhymes (e.g., never, matter)\n\
         - Hard: few rhymes (e.g., orange, silver)\n\
         Return only the word, no punctuation, no explanation.",
        difficulty
    )
}

/// First whitespace-delimited token of the reply, with any leading or
/// trailing non-alphanumeric characters (quotes, ellipses, dashes, markdown
/// emphasis) stripped.
pub fn extract_word(raw: &str) -> &str {
    raw.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
}
