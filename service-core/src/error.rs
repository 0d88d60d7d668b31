use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    /// A shaped response failed its schema check. This is a contract mismatch
    /// with an upstream provider, not a client error.
    #[error("Validation failed: {0}")]
    ValidationFailure(#[from] validator::ValidationErrors),

    #[error("Upstream failure: {message}")]
    UpstreamFailure { message: String, body: String },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Flatten validator errors into `[{field, code, message}]`, sorted by field.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut entries: Vec<(String, Value)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors
                .iter()
                .map(|err| {
                    (
                        field.clone(),
                        json!({
                            "field": field,
                            "code": err.code.to_string(),
                            "message": err.message.as_ref().map(|m| m.to_string()),
                        }),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect();

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Value::Array(entries.into_iter().map(|(_, v)| v).collect())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<Value>,
        }

        let (status, error_message, details) = match self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None),
            AppError::ValidationFailure(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Validation failed".to_string(),
                Some(validation_details(&err)),
            ),
            AppError::UpstreamFailure { message, body } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message,
                Some(Value::String(body)),
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
                Some(Value::String(format!("{:#}", err))),
            ),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(Value::String(err.to_string())),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{ValidationError, ValidationErrors};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_has_no_details() {
        let response = AppError::BadRequest(anyhow::anyhow!("missing param")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "missing param" }));
    }

    #[tokio::test]
    async fn internal_error_reports_cause_chain() {
        let err = anyhow::anyhow!("connection reset").context("calling provider");
        let response = AppError::InternalError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Something went wrong");
        assert_eq!(body["details"], "calling provider: connection reset");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_raw_body() {
        let response = AppError::UpstreamFailure {
            message: "Rhymes provider returned 404 Not Found".to_string(),
            body: r#"{"success":false,"message":"word not found"}"#.to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Rhymes provider returned 404 Not Found");
        assert_eq!(
            body["details"],
            r#"{"success":false,"message":"word not found"}"#
        );
    }

    #[tokio::test]
    async fn validation_failure_lists_fields() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("single_token");
        err.message = Some(Cow::from("must be a single word"));
        errors.add("word", err);
        errors.add("rhymes", ValidationError::new("type"));

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["details"],
            json!([
                { "field": "rhymes", "code": "type", "message": null },
                { "field": "word", "code": "single_token", "message": "must be a single word" },
            ])
        );
    }

    #[tokio::test]
    async fn service_unavailable_maps_to_503() {
        let response =
            AppError::ServiceUnavailable("text provider not configured".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
