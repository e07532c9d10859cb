//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. It replaces process-wide globals
//! for configuration and the collection handle with one explicit context,
//! built once at startup.
//!
//! The state is cheaply cloneable (`Arc` internally) so it can be handed to
//! each request handler without copying resources.

use crate::config::AppConfig;
use crate::domain::{BookStorePtr, MetricsPtr, RandomSourcePtr, RequestTracker};
use axum::http::Method;
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Handlers depend on abstractions (`BookStore`,
///   `Metrics`, `RandomSource`), not concrete backends, so tests can run
///   against an in-memory store with pinned randomness.
/// - **Immutable After Initialization**: Configuration is read once at
///   startup and never reloaded by a request.
/// - **Cheap Cloning**: Every field is behind an `Arc`.
///
/// # Lifecycle
///
/// 1. Created once in `create_app_state()` (or directly in tests)
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration, immutable for the life of the process.
    config: Arc<AppConfig>,

    /// Document store holding the book collection.
    ///
    /// Either MongoDB-backed (production) or in-memory (development/testing).
    store: BookStorePtr,

    /// Metrics implementation for the instrumented endpoints.
    ///
    /// Either Prometheus-backed or no-op.
    metrics: MetricsPtr,

    /// Random source for the delayed-echo and random-error endpoints.
    random: RandomSourcePtr,
}

impl AppState {
    // ---

    pub fn new(
        config: AppConfig,
        store: BookStorePtr,
        metrics: MetricsPtr,
        random: RandomSourcePtr,
    ) -> Self {
        // ---
        AppState {
            config: Arc::new(config),
            store,
            metrics,
            random,
        }
    }

    /// Get a reference to the startup configuration.
    pub fn config(&self) -> &AppConfig {
        // ---
        &self.config
    }

    /// Get a reference to the book store.
    pub fn store(&self) -> &BookStorePtr {
        // ---
        &self.store
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the random source.
    pub fn random(&self) -> &RandomSourcePtr {
        // ---
        &self.random
    }

    /// Start tracking an instrumented request, labeled with this service's name.
    pub(crate) fn track_request(&self, method: &Method, path: &str) -> RequestTracker {
        // ---
        RequestTracker::start(
            self.metrics.clone(),
            &self.config.service.name,
            method.as_str(),
            path,
        )
    }
}
