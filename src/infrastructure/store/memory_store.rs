use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Book, BookFilter, BookPatch, BookStore, BookStorePtr, UpdateOutcome};

pub fn create_memory_store() -> BookStorePtr {
    // ---
    tracing::info!("Using in-memory book store");
    Arc::new(InMemoryBookStore::new())
}

/// Book collection held in process memory, in insertion order.
///
/// Used for development without a database and as the store in tests.
#[derive(Default)]
pub struct InMemoryBookStore {
    // ---
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        // ---
        Self {
            books: RwLock::new(books),
        }
    }

    pub async fn len(&self) -> usize {
        // ---
        self.books.read().await.len()
    }
}

#[async_trait::async_trait]
impl BookStore for InMemoryBookStore {
    // ---
    async fn find_many(&self, filter: &BookFilter, limit: Option<usize>) -> Result<Vec<Book>> {
        // ---
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| filter.matches(b))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>> {
        // ---
        let books = self.books.read().await;
        Ok(books.iter().find(|b| filter.matches(b)).cloned())
    }

    async fn insert_one(&self, book: Book) -> Result<()> {
        // ---
        self.books.write().await.push(book);
        Ok(())
    }

    async fn insert_many(&self, books: Vec<Book>) -> Result<usize> {
        // ---
        let count = books.len();
        self.books.write().await.extend(books);
        Ok(count)
    }

    async fn update_one(&self, filter: &BookFilter, patch: BookPatch) -> Result<UpdateOutcome> {
        // ---
        let mut books = self.books.write().await;
        let outcome = match books.iter_mut().find(|b| filter.matches(b)) {
            Some(book) => UpdateOutcome {
                matched: 1,
                modified: u64::from(patch.apply(book)),
            },
            None => UpdateOutcome::default(),
        };
        Ok(outcome)
    }

    async fn delete_many(&self, filter: &BookFilter) -> Result<u64> {
        // ---
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| !filter.matches(b));
        Ok((before - books.len()) as u64)
    }
}
