pub mod metrics;
mod random;
mod store;

// Re-export the factory functions for easy access
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use random::create_thread_random;
pub use store::{create_memory_store, create_mongo_store, seed_store, InMemoryBookStore};
