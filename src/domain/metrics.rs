use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (gauge, counter, histogram).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Increment the active-connections gauge for `service`.
    fn connection_opened(&self, service: &str);

    /// Decrement the active-connections gauge for `service`.
    fn connection_closed(&self, service: &str);

    /// Count a completed request and observe its duration.
    fn record_http_request(
        &self,
        start: Instant,
        service: &str,
        path: &str,
        method: &str,
        status: u16,
    );
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;

/// Deferred recorder for an instrumented request.
///
/// Creating the tracker opens a connection on the gauge. Dropping it closes
/// the connection and records the request with whatever status was last set
/// (200 unless changed), so a cancelled handler still gets accounted for.
pub struct RequestTracker {
    // ---
    metrics: MetricsPtr,
    service: String,
    method: String,
    path: String,
    status: u16,
    start: Instant,
}

impl RequestTracker {
    // ---
    pub fn start(metrics: MetricsPtr, service: &str, method: &str, path: &str) -> Self {
        // ---
        metrics.connection_opened(service);

        Self {
            metrics,
            service: service.to_string(),
            method: method.to_string(),
            path: path.to_string(),
            status: 200,
            start: Instant::now(),
        }
    }

    /// Set the status code that will be recorded on completion.
    pub fn set_status(&mut self, status: u16) {
        // ---
        self.status = status;
    }

    pub fn status(&self) -> u16 {
        // ---
        self.status
    }
}

impl Drop for RequestTracker {
    // ---
    fn drop(&mut self) {
        // ---
        self.metrics.record_http_request(
            self.start,
            &self.service,
            &self.path,
            &self.method,
            self.status,
        );
        self.metrics.connection_closed(&self.service);
    }
}
