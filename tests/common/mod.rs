// Test helpers are intentionally partially used
#![allow(dead_code)]

use book_store::domain::{RandomSource, RandomSourcePtr};
use book_store::{
    build_router, create_memory_store, create_noop_metrics, seed_store, AppConfig, AppState,
};
use reqwest::Client;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

static TRACING: Once = Once::new();

/// Enable log output only when requested with `TEST_DEBUG`.
fn init_test_tracing() {
    // ---
    TRACING.call_once(|| {
        if std::env::var("TEST_DEBUG").is_ok() {
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_test_writer()
                .try_init()
                .ok();
        }
    });
}

/// Random source that always draws zero: no delay, no injected error.
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn below(&self, _upper: u32) -> u32 {
        0
    }
}

pub fn zero_random() -> RandomSourcePtr {
    // ---
    Arc::new(ZeroRandom)
}

/// Seeded in-memory state with no-op metrics and pinned randomness.
pub async fn seeded_state() -> AppState {
    // ---
    let store = create_memory_store();
    seed_store(&store).await.expect("seeding an in-memory store cannot fail");

    AppState::new(
        AppConfig::default(),
        store,
        create_noop_metrics().expect("noop metrics"),
        zero_random(),
    )
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // ---
        Self::with_state(seeded_state().await).await
    }

    pub async fn with_state(state: AppState) -> Self {
        // ---
        init_test_tracing();

        let app = build_router(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
