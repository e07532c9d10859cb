// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod books;
mod chaos;
mod health;
mod info;
mod metrics;
mod root;
mod shared_types;

// Core handlers
pub use health::is_alive;
pub use info::{host_info, version};
pub use metrics::metrics_handler;
pub use root::root_handler;

// Simulated latency and failure
pub use chaos::{echo_with_delay, random_error, MAX_DELAY_SECS};

// Book CRUD handlers
pub use books::{create_book, delete_book, delete_books, get_book, list_books, update_book};
pub use books::{
    BOOKS_DELETED, BOOK_CREATED, BOOK_DELETED, BOOK_NOT_FOUND, LIST_LIMIT, PRICE_UPDATED,
};
pub use shared_types::INTERNAL_ERROR_BODY;
