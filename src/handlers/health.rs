use axum::{http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct AliveResponse {
    alive: bool,
}

/// Liveness probe (GET /isAlive).
///
/// Always responds `200 OK` with `{"alive": true}`; it never touches the store.
pub async fn is_alive() -> (StatusCode, Json<AliveResponse>) {
    // ---
    let start = Instant::now();
    tracing::info!("Alive method");

    let response = (StatusCode::OK, Json(AliveResponse { alive: true }));

    tracing::info!("Elapsed time of /isAlive: {:?}", start.elapsed());
    response
}
