use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::startup::AppState;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "rhyme-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint for K8s readiness probes.
///
/// Only checks provider configuration; no upstream call is made.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let text_provider = state.word_generator.provider();
    let rhymes_provider = state.rhyme_lookup.provider();

    let checks = [
        (text_provider.name(), text_provider.health_check().await),
        (rhymes_provider.name(), rhymes_provider.health_check().await),
    ];

    for (provider, check) in checks {
        if let Err(e) = check {
            tracing::warn!(provider, error = %e, "Readiness check failed");
            return Err(AppError::ServiceUnavailable(format!("{}: {}", provider, e)));
        }
    }

    Ok(StatusCode::OK)
}
