use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use serde::Deserialize;
use service_core::error::AppError;

use crate::models::{Difficulty, WordResult};
use crate::services::metrics;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct RandomWordQuery {
    pub difficulty: Option<String>,
}

/// `GET /randomword?difficulty=easy|medium|hard`
#[tracing::instrument(skip(state, query))]
pub async fn random_word(
    State(state): State<AppState>,
    query: Result<Query<RandomWordQuery>, QueryRejection>,
) -> Result<Json<WordResult>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    let difficulty: Difficulty = query
        .difficulty
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e| {
            tracing::debug!(difficulty = ?query.difficulty, "Rejected difficulty");
            AppError::BadRequest(anyhow::Error::new(e))
        })?;

    match state.word_generator.generate(difficulty).await {
        Ok(result) => {
            metrics::record_word_generation(difficulty.as_str(), "success");
            Ok(Json(result))
        }
        Err(e) => {
            metrics::record_word_generation(difficulty.as_str(), super::outcome_label(&e));
            Err(e)
        }
    }
}
