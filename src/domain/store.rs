use super::book::Book;
use anyhow::Result;
use std::sync::Arc;

/// Equality filter over a single book field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    // ---
    /// Matches every document in the collection.
    All,
    Id(String),
    Isbn(String),
}

impl BookFilter {
    // ---
    /// Evaluate the filter against a book held in memory.
    pub fn matches(&self, book: &Book) -> bool {
        // ---
        match self {
            BookFilter::All => true,
            BookFilter::Id(id) => book.id == *id,
            BookFilter::Isbn(isbn) => book.isbn == *isbn,
        }
    }
}

/// Partial update applied by [`BookStore::update_one`]. Only `price` is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    // ---
    pub price: Option<String>,
}

impl BookPatch {
    // ---
    pub fn price(price: impl Into<String>) -> Self {
        // ---
        Self {
            price: Some(price.into()),
        }
    }

    /// Apply the patch in place, returning whether any field changed.
    pub fn apply(&self, book: &mut Book) -> bool {
        // ---
        match &self.price {
            Some(price) if book.price != *price => {
                book.price = price.clone();
                true
            }
            _ => false,
        }
    }
}

/// Result of an update: how many documents matched and how many changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    // ---
    pub matched: u64,
    pub modified: u64,
}

/// Abstraction over the document store holding the book collection.
///
/// Each method maps to exactly one store operation. No retries, no deadlines;
/// errors are returned to the caller as-is.
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    // ---
    /// Fetch documents matching `filter` in store order, at most `limit` of them.
    async fn find_many(&self, filter: &BookFilter, limit: Option<usize>) -> Result<Vec<Book>>;

    /// Fetch the first document matching `filter`.
    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>>;

    /// Insert a single document. No uniqueness check is performed.
    async fn insert_one(&self, book: Book) -> Result<()>;

    /// Insert a batch of documents, returning how many were inserted.
    async fn insert_many(&self, books: Vec<Book>) -> Result<usize>;

    /// Apply `patch` to the first document matching `filter`.
    async fn update_one(&self, filter: &BookFilter, patch: BookPatch) -> Result<UpdateOutcome>;

    /// Remove every document matching `filter`, returning the deleted count.
    async fn delete_many(&self, filter: &BookFilter) -> Result<u64>;
}

/// Type alias for any backend that implements BookStore.
pub type BookStorePtr = Arc<dyn BookStore>;
