//! Prometheus metrics implementation.
//!
//! Implements the `Metrics` trait on top of the global `metrics` crate registry.
//! The instruments themselves live in `counters.rs`; the single global
//! `PrometheusHandle` that renders them lives in `recorder.rs`.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Stateless: every instrument is registered in the global recorder on first
/// use, keyed by its label set.
pub struct PrometheusMetrics;

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn connection_opened(&self, service: &str) {
        super::increment_active_connections(service);
    }

    fn connection_closed(&self, service: &str) {
        super::decrement_active_connections(service);
    }

    fn record_http_request(
        &self,
        start: Instant,
        service: &str,
        path: &str,
        method: &str,
        status: u16,
    ) {
        tracing::debug!("Recording {} {} -> {}", method, path, status);
        super::track_http_request(start, service, path, method, status);
    }
}
