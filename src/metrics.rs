//! Prometheus metrics for request and store monitoring.
//!
//! This module provides metrics for:
//! - HTTP requests by route and status
//! - Store query latency by operation
//! - Secrets created

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Store query latency metric name.
pub const METRIC_STORE_QUERY_LATENCY: &str = "store_query_latency_ms";
/// Secrets created counter metric name.
pub const METRIC_SECRETS_CREATED: &str = "secrets_created_total";

/// Install the global Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests by route and status"
    );
    describe_histogram!(
        METRIC_STORE_QUERY_LATENCY,
        "Store query latency in milliseconds"
    );
    describe_counter!(
        METRIC_SECRETS_CREATED,
        "Total number of secret messages created"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Build a handle backed by a recorder that is not installed globally.
///
/// Useful in tests, where the global recorder can only be set once.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// Record store query latency.
pub fn record_store_latency(start: Instant, op: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_STORE_QUERY_LATENCY, "op" => op).record(latency_ms);
}

/// Increment HTTP request counter.
pub fn inc_http_requests(route: String, status: u16) {
    counter!(METRIC_HTTP_REQUESTS, "route" => route, "status" => status.to_string()).increment(1);
}

/// Increment secrets created counter.
pub fn inc_secrets_created() {
    counter!(METRIC_SECRETS_CREATED).increment(1);
}
