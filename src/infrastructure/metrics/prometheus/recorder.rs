use anyhow::Result;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use super::counters::{describe_metrics, DURATION_BUCKETS, HTTP_REQ_DURATION};

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder globally and store the handle.
///
/// Only the first call installs; later calls reuse the existing handle.
pub fn init_metrics() -> Result<()> {
    HANDLE.get_or_try_init(|| -> Result<PrometheusHandle> {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQ_DURATION.to_string()),
                &DURATION_BUCKETS,
            )?
            .install_recorder()?;

        describe_metrics();
        Ok(handle)
    })?;

    Ok(())
}

/// Render the current metrics in Prometheus text format.
///
/// Empty until [`init_metrics`] has succeeded.
pub fn render_metrics() -> String {
    HANDLE.get().map(PrometheusHandle::render).unwrap_or_default()
}
