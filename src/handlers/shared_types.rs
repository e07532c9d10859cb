use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

/// Plain-text body returned when a store operation fails.
pub const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// Error wrapper for handlers backed by the document store.
///
/// Any store failure is logged and surfaced as a plain-text `500`; the
/// process keeps serving other requests.
#[derive(Debug)]
pub struct StoreError(anyhow::Error);

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError(err)
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        tracing::error!("Store operation failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
    }
}

/// Query string pairs in order of appearance.
///
/// Lookups never fail: a missing key reads as `""` and a repeated key reads
/// as its first value. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    // ---
    /// First value for `key`, or the empty string.
    pub fn first(&self, key: &str) -> String {
        // ---
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }
}
