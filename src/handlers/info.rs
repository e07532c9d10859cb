use crate::AppState;
use axum::{extract::State, http::StatusCode};
use std::time::Instant;

/// Host info (GET /info).
///
/// Responds with the machine's host name, or an empty body if it cannot be read.
pub async fn host_info() -> (StatusCode, String) {
    // ---
    let start = Instant::now();
    tracing::info!("Host info");

    let host = hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default();

    tracing::info!("Elapsed time of /info: {:?}", start.elapsed());
    (StatusCode::OK, host)
}

/// Version info (GET /version).
///
/// Responds with the version resolved at startup. Configuration is not
/// re-read here.
pub async fn version(State(state): State<AppState>) -> (StatusCode, String) {
    // ---
    let start = Instant::now();
    tracing::info!("Version info");

    let version = state.config().service.version.clone();

    tracing::info!("Elapsed time of /version: {:?}", start.elapsed());
    (StatusCode::OK, version)
}
