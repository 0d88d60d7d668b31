use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use serde::Deserialize;
use service_core::error::AppError;

use crate::models::RhymeResult;
use crate::services::metrics;
use crate::services::rhyme_lookup::WORD_REQUIRED_MESSAGE;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct RhymesQuery {
    pub word: Option<String>,
}

/// `GET /rhymes?word=...`
#[tracing::instrument(skip(state, query))]
pub async fn rhymes(
    State(state): State<AppState>,
    query: Result<Query<RhymesQuery>, QueryRejection>,
) -> Result<Json<RhymeResult>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    let word = query
        .word
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(WORD_REQUIRED_MESSAGE)))?;

    match state.rhyme_lookup.lookup(&word).await {
        Ok(result) => {
            metrics::record_rhyme_lookup("success");
            Ok(Json(result))
        }
        Err(e) => {
            metrics::record_rhyme_lookup(super::outcome_label(&e));
            Err(e)
        }
    }
}
