mod book;
mod metrics;
mod random;
mod store;

// Book model and the fixed startup seed
pub use book::{seed_books, Author, Book};

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr, RequestTracker};

// Injectable randomness for the chaos endpoints
pub use random::{RandomSource, RandomSourcePtr};

// Publicly expose the document store abstraction
pub use store::{BookFilter, BookPatch, BookStore, BookStorePtr, UpdateOutcome};
