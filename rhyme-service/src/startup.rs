//! Application startup and lifecycle management.
//!
//! Builds the providers from configuration, wires them into the HTTP router
//! and owns the listener.

use crate::config::RhymeConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::words_api::WordsApiProvider;
use crate::services::providers::{RhymesProvider, TextProvider};
use crate::services::{RhymeLookup, WordGenerator};
use axum::{
    http::{Method, Request},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware, tracing::REQUEST_ID_HEADER,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: RhymeConfig,
    pub word_generator: WordGenerator,
    pub rhyme_lookup: RhymeLookup,
}

impl AppState {
    /// Wire the given providers; tests pass mocks here.
    pub fn new(
        config: RhymeConfig,
        text_provider: Arc<dyn TextProvider>,
        rhymes_provider: Arc<dyn RhymesProvider>,
    ) -> Self {
        let word_generator = WordGenerator::new(text_provider, config.models.temperature);
        let rhyme_lookup = RhymeLookup::new(rhymes_provider);

        Self {
            config,
            word_generator,
            rhyme_lookup,
        }
    }

    /// Build the real Gemini and WordsAPI providers over one pooled client.
    pub fn from_config(config: RhymeConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        // 0 keeps reqwest's default of no timeout.
        if config.http_client.timeout_secs > 0 {
            builder = builder.timeout(config.http_client.timeout());
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to create HTTP client: {}", e);
            AppError::InternalError(anyhow::Error::new(e).context("Failed to create HTTP client"))
        })?;

        let text_provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(
            GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.models.text_model.clone(),
                base_url: config.google.api_base_url.clone(),
            },
            client.clone(),
        ));

        tracing::info!(
            model = %config.models.text_model,
            temperature = config.models.temperature,
            "Initialized Gemini text provider"
        );

        let rhymes_provider: Arc<dyn RhymesProvider> =
            Arc::new(WordsApiProvider::new(config.words_api.clone(), client));

        tracing::info!(
            host = %config.words_api.host,
            "Initialized WordsAPI rhymes provider"
        );

        Ok(Self::new(config, text_provider, rhymes_provider))
    }
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/randomword", get(handlers::random_word))
        .route("/rhymes", get(handlers::rhymes))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS]),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RhymeConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Bind the listener for an already wired state.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let http_addr = state.config.common.listen_addr();
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Rhyme service: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.http_listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
