//! HTTP handlers for rhyme-service.

pub mod health;
pub mod random_word;
pub mod rhymes;

use axum::response::IntoResponse;
use service_core::error::AppError;

pub use health::{health_check, readiness_check};
pub use random_word::random_word;
pub use rhymes::rhymes;

pub async fn metrics() -> impl IntoResponse {
    crate::services::metrics::get_metrics()
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}

/// Metric label for a failed request.
fn outcome_label(err: &AppError) -> &'static str {
    match err {
        AppError::BadRequest(_) => "bad_request",
        AppError::ValidationFailure(_) => "validation_failure",
        AppError::UpstreamFailure { .. } => "upstream_failure",
        _ => "error",
    }
}
