//! Prometheus metrics for rhyme-service.
//!
//! HTTP request metrics come from the `metrics` facade (see
//! `service_core::middleware::metrics`) and are rendered by the installed
//! recorder; word and provider metrics live in a custom registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static WORD_GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static RHYME_LOOKUPS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }

    let registry = Registry::new();

    let word_generations = IntCounterVec::new(
        Opts::new(
            "word_generations_total",
            "Random word requests by difficulty and outcome",
        ),
        &["difficulty", "status"],
    )
    .expect("Failed to create word_generations_total metric");

    let rhyme_lookups = IntCounterVec::new(
        Opts::new("rhyme_lookups_total", "Rhyme lookups by outcome"),
        &["status"],
    )
    .expect("Failed to create rhyme_lookups_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "provider_latency_seconds",
            "External provider API latency in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]),
        &["provider"],
    )
    .expect("Failed to create provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("provider_errors_total", "External provider errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create provider_errors_total metric");

    registry
        .register(Box::new(word_generations.clone()))
        .expect("Failed to register word_generations_total");
    registry
        .register(Box::new(rhyme_lookups.clone()))
        .expect("Failed to register rhyme_lookups_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register provider_errors_total");

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = WORD_GENERATIONS_TOTAL.set(word_generations);
    let _ = RHYME_LOOKUPS_TOTAL.set(rhyme_lookups);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
        }
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record the outcome of a random word request.
pub fn record_word_generation(difficulty: &str, status: &str) {
    if let Some(counter) = WORD_GENERATIONS_TOTAL.get() {
        counter.with_label_values(&[difficulty, status]).inc();
    }
}

/// Record the outcome of a rhyme lookup.
pub fn record_rhyme_lookup(status: &str) {
    if let Some(counter) = RHYME_LOOKUPS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[provider]).observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_before_init_is_a_no_op() {
        record_word_generation("easy", "success");
        record_rhyme_lookup("success");
        record_provider_latency("mock", 0.1);
        record_provider_error("mock", "network_error");
    }

    #[test]
    fn renders_placeholder_without_recorder() {
        if METRICS_HANDLE.get().is_none() {
            assert!(get_metrics().starts_with("# Metrics recorder not initialized"));
        }
    }
}
