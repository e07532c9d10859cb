//! Endpoints that simulate slow and failing requests.
//!
//! Both are instrumented: a [`RequestTracker`](crate::domain::RequestTracker)
//! holds the active-connections gauge up for the life of the request and
//! records the counter and duration histogram when it is dropped.

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
};
use std::time::{Duration, Instant};

use crate::handlers::shared_types::QueryPairs;
use crate::AppState;

/// Delays are drawn uniformly from `0..MAX_DELAY_SECS` whole seconds.
pub const MAX_DELAY_SECS: u32 = 30;

/// Delayed echo (GET /echoWithDelay?message=M).
///
/// Sleeps for a random whole number of seconds below [`MAX_DELAY_SECS`], then
/// responds `200 OK` with the first `message` verbatim (empty if absent). The sleep
/// only parks this request's task.
pub async fn echo_with_delay(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<QueryPairs>,
) -> (StatusCode, String) {
    // ---
    let start = Instant::now();
    let _tracker = state.track_request(&method, uri.path());

    let delay = Duration::from_secs(u64::from(state.random().below(MAX_DELAY_SECS)));
    tracing::info!("Delayed response with a duration of {:?}", delay);
    tokio::time::sleep(delay).await;

    tracing::info!("Elapsed time of {}: {:?}", uri.path(), start.elapsed());
    (StatusCode::OK, query.first("message"))
}

/// Random error (GET /randomError).
///
/// Picks one of three outcomes with equal probability:
/// `200 It works fine!`, `404 Not found`, `500 Internal server error`.
pub async fn random_error(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> (StatusCode, &'static str) {
    // ---
    let start = Instant::now();
    let mut tracker = state.track_request(&method, uri.path());

    let (status, body) = match state.random().below(3) {
        1 => (StatusCode::NOT_FOUND, "404 - Not found"),
        2 => (StatusCode::INTERNAL_SERVER_ERROR, "500 - Internal server error"),
        _ => (StatusCode::OK, "200 - It works fine!"),
    };
    tracker.set_status(status.as_u16());

    tracing::info!("Elapsed time of {}: {:?}", uri.path(), start.elapsed());
    (status, body)
}
