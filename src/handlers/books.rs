use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::domain::{Author, Book, BookFilter, BookPatch};
use crate::handlers::shared_types::{QueryPairs, StoreError};
use crate::AppState;

/// Maximum number of books returned by the list endpoint.
pub const LIST_LIMIT: usize = 5;

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const BOOK_CREATED: &str = "Book entry created successfully";
pub const PRICE_UPDATED: &str = "Price updated";
pub const BOOK_DELETED: &str = "Book entry deleted successfully";
pub const BOOKS_DELETED: &str = "Book entries deleted successfully";

/// Builds a book from create query parameters. Missing parameters become empty strings.
fn book_from_query(query: &QueryPairs) -> Book {
    // ---
    Book {
        id: query.first("id"),
        isbn: query.first("isbn"),
        title: query.first("title"),
        price: query.first("price"),
        author: Author::new(query.first("author_name"), query.first("author_lastname")),
    }
}

/// Handler for listing books (GET /api/books).
///
/// Responds with a JSON array of at most [`LIST_LIMIT`] books in store order,
/// `[]` when the collection is empty.
#[tracing::instrument(skip(state))]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request /api/books");

    let books = state
        .store()
        .find_many(&BookFilter::All, Some(LIST_LIMIT))
        .await?;

    tracing::info!("Found {} documents", books.len());
    tracing::info!("Elapsed time of /api/books response: {:?}", start.elapsed());
    Ok(Json(books))
}

/// Handler for fetching a book by ISBN (GET /api/books/{isbn}).
///
/// - If a book with that ISBN exists, responds with `200 OK` and the book as JSON.
/// - Otherwise responds with `404 Not Found` and the text `Book not found`.
#[tracing::instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Response, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request /api/books/{}", isbn);

    let found = state
        .store()
        .find_one(&BookFilter::Isbn(isbn.clone()))
        .await?;

    let response = match found {
        Some(book) => {
            tracing::info!("Found a single document: {:?}", book);
            Json(book).into_response()
        }
        None => {
            tracing::info!("Book with ISBN {} not found", isbn);
            (StatusCode::NOT_FOUND, BOOK_NOT_FOUND).into_response()
        }
    };

    tracing::info!("Elapsed time of /api/books/{{isbn}} response: {:?}", start.elapsed());
    Ok(response)
}

/// Handler for creating a book (POST /api/books).
///
/// All fields come from query parameters. The book is inserted as given;
/// no uniqueness check is made on `id` or `isbn`.
#[tracing::instrument(skip(state, query))]
pub async fn create_book(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<&'static str>, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request: Creating a new entry in book store");

    let book = book_from_query(&query);
    tracing::info!("Inserting book id={} isbn={}", book.id, book.isbn);
    state.store().insert_one(book).await?;

    tracing::info!("Elapsed time of /api/books response: {:?}", start.elapsed());
    Ok(Json(BOOK_CREATED))
}

/// Handler for updating a book's price (PUT /api/books/{isbn}).
///
/// The book is selected by the `id` query parameter; the path segment is
/// accepted but not used. Responds with `200 OK` whether or not a book matched.
#[tracing::instrument(skip(state, query))]
pub async fn update_book(
    State(state): State<AppState>,
    Path(_isbn): Path<String>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<&'static str>, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request: Update book");

    let outcome = state
        .store()
        .update_one(
            &BookFilter::Id(query.first("id")),
            BookPatch::price(query.first("price")),
        )
        .await?;

    tracing::info!(
        "Matched {} documents and updated {} documents.",
        outcome.matched,
        outcome.modified
    );
    tracing::info!("Elapsed time of /api/books/{{isbn}} response: {:?}", start.elapsed());
    Ok(Json(PRICE_UPDATED))
}

/// Handler for deleting books by ISBN (DELETE /api/deletebook).
///
/// Removes every book sharing the `isbn` query parameter, possibly none.
#[tracing::instrument(skip(state, query))]
pub async fn delete_book(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<&'static str>, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request: Delete book in book store");

    let deleted = state
        .store()
        .delete_many(&BookFilter::Isbn(query.first("isbn")))
        .await?;

    tracing::info!("Deleted {} documents in the books collection", deleted);
    tracing::info!("Elapsed time of /api/deletebook response: {:?}", start.elapsed());
    Ok(Json(BOOK_DELETED))
}

/// Handler for emptying the collection (DELETE /api/deletebooks).
#[tracing::instrument(skip(state))]
pub async fn delete_books(State(state): State<AppState>) -> Result<Json<&'static str>, StoreError> {
    // ---
    let start = Instant::now();
    tracing::info!("Request: Delete all books");

    let deleted = state.store().delete_many(&BookFilter::All).await?;

    tracing::info!("Deleted {} documents in the books collection", deleted);
    tracing::info!("Elapsed time of /api/deletebooks response: {:?}", start.elapsed());
    Ok(Json(BOOKS_DELETED))
}
