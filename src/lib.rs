// src/lib.rs
use anyhow::Result;
use axum::{
    routing::{delete, get},
    Router,
};

use handlers::*;
use tracing_subscriber::EnvFilter;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

#[cfg(test)]
mod test_support;

pub use app_state::AppState;
pub use config::*;

// Response bodies of the fixed-text endpoints, for clients and tests
pub use handlers::{
    BOOKS_DELETED, BOOK_CREATED, BOOK_DELETED, BOOK_NOT_FOUND, INTERNAL_ERROR_BODY, LIST_LIMIT,
    MAX_DELAY_SECS, PRICE_UPDATED,
};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_memory_store, // ---
    create_mongo_store,
    create_noop_metrics,
    create_prom_metrics,
    create_thread_random,
    seed_store,
    InMemoryBookStore,
};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}

/// Build the shared application state from configuration.
///
/// Connects the configured store (fatal if MongoDB is unreachable), installs
/// the configured metrics backend and seeds the sample books if enabled.
pub async fn create_app_state(config: AppConfig) -> Result<AppState> {
    // ---
    let metrics = match config.server.metrics {
        MetricsBackend::Prometheus => create_prom_metrics()?,
        MetricsBackend::Noop => create_noop_metrics()?,
    };

    let store = match config.database.backend {
        StoreBackend::Mongo => create_mongo_store(&config.database).await?,
        StoreBackend::Memory => create_memory_store(),
    };

    if config.database.seed {
        if let Err(err) = seed_store(&store).await {
            tracing::warn!("Failed to insert seed documents: {:#}", err);
        }
    }

    Ok(AppState::new(config, store, metrics, create_thread_random()))
}

/// Build the HTTP router over an already constructed state.
pub fn build_router(app_state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/isAlive", get(is_alive))
        .route("/info", get(host_info))
        .route("/version", get(version))
        .route("/echoWithDelay", get(echo_with_delay))
        .route("/randomError", get(random_error))
        .route("/metrics", get(metrics_handler))
        .nest(
            "/api",
            Router::new()
                .route("/books", get(list_books).post(create_book))
                .route("/books/{isbn}", get(get_book).put(update_book))
                .route("/deletebook", delete(delete_book))
                .route("/deletebooks", delete(delete_books)),
        )
        .with_state(app_state)
}

/// Build the HTTP router from configuration.
pub async fn create_router_with_config(config: AppConfig) -> Result<Router> {
    // ---
    let app_state = create_app_state(config).await?;
    Ok(build_router(app_state))
}

/// Build the HTTP router with configuration loaded from file and environment.
pub async fn create_router() -> Result<Router> {
    // ---
    let config = AppConfig::load()?;
    create_router_with_config(config).await
}
