mod memory_store;
mod mongo_store;

pub use memory_store::{create_memory_store, InMemoryBookStore};
pub use mongo_store::create_mongo_store;

use crate::domain::{seed_books, BookStorePtr};
use anyhow::Result;

/// Inserts the fixed sample records, returning how many were written.
pub async fn seed_store(store: &BookStorePtr) -> Result<usize> {
    // ---
    let inserted = store.insert_many(seed_books()).await?;
    tracing::info!("Inserted {} seed documents", inserted);
    Ok(inserted)
}
