//! Axum middleware shared by the services.

pub mod metrics;
pub mod security_headers;
pub mod tracing;
