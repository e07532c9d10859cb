use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Instant;

/// Gauge of in-flight instrumented requests, labeled by `service`.
pub const ACTIVE_CONNECTIONS: &str = "active_connections";

/// Counter of completed instrumented requests, labeled by `code` and `path`.
pub const HTTP_REQ_PROCESSED: &str = "http_req_processed_total";

/// Histogram of request durations in seconds, labeled by `service`, `code`, `method`, `path`.
pub const HTTP_REQ_DURATION: &str = "http_req_duration_seconds";

pub const DURATION_BUCKETS: [f64; 9] = [0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

/// Register help text for every instrument. Requires an installed recorder.
pub fn describe_metrics() {
    describe_gauge!(ACTIVE_CONNECTIONS, "Number of active client connections");
    describe_counter!(HTTP_REQ_PROCESSED, "Total number of HTTP requests processed");
    describe_histogram!(HTTP_REQ_DURATION, "Duration of all HTTP requests");
}

pub fn increment_active_connections(service: &str) {
    gauge!(ACTIVE_CONNECTIONS, "service" => service.to_string()).increment(1.0);
}

pub fn decrement_active_connections(service: &str) {
    gauge!(ACTIVE_CONNECTIONS, "service" => service.to_string()).decrement(1.0);
}

/// Count the request and record its latency in the duration histogram.
pub fn track_http_request(start: Instant, service: &str, path: &str, method: &str, status: u16) {
    let code = status.to_string();

    counter!(HTTP_REQ_PROCESSED, "code" => code.clone(), "path" => path.to_string()).increment(1);

    histogram!(
        HTTP_REQ_DURATION,
        "service" => service.to_string(),
        "code" => code,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed());
}
