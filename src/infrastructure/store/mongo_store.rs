use anyhow::{Context, Result};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::domain::{Author, Book, BookFilter, BookPatch, BookStore, BookStorePtr, UpdateOutcome};

/// Stored shape of a book. Field names are lowercase in the collection;
/// the server-assigned `_id` is ignored.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDocument {
    // ---
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub price: String,
    pub author: AuthorDocument,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorDocument {
    // ---
    pub firstname: String,
    pub lastname: String,
}

impl From<Book> for BookDocument {
    fn from(book: Book) -> Self {
        // ---
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            price: book.price,
            author: AuthorDocument {
                firstname: book.author.firstname,
                lastname: book.author.lastname,
            },
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        // ---
        Self {
            id: document.id,
            isbn: document.isbn,
            title: document.title,
            price: document.price,
            author: Author::new(document.author.firstname, document.author.lastname),
        }
    }
}

/// Connects to MongoDB and verifies the connection with a `ping`.
///
/// # Errors
/// Fails if the connection string is invalid or the server does not answer
/// the ping. Callers treat this as fatal at startup.
pub async fn create_mongo_store(config: &DatabaseConfig) -> Result<BookStorePtr> {
    // ---
    let uri = config.uri();
    let client = Client::with_uri_str(&uri)
        .await
        .with_context(|| format!("failed to create MongoDB client for {uri}"))?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("MongoDB at {uri} did not answer ping"))?;

    tracing::info!(
        "Application connected to database {} at port {}",
        config.host,
        config.port
    );

    let collection = client
        .database(&config.database)
        .collection::<BookDocument>(&config.collection);

    Ok(Arc::new(MongoBookStore::new(collection)))
}

pub struct MongoBookStore {
    // ---
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    // ---
    pub fn new(collection: Collection<BookDocument>) -> Self {
        // ---
        Self { collection }
    }
}

fn filter_document(filter: &BookFilter) -> Document {
    // ---
    match filter {
        BookFilter::All => doc! {},
        BookFilter::Id(id) => doc! { "id": id.as_str() },
        BookFilter::Isbn(isbn) => doc! { "isbn": isbn.as_str() },
    }
}

/// `$set` fields for a patch, or `None` when the patch sets nothing.
fn set_document(patch: &BookPatch) -> Option<Document> {
    // ---
    let mut set = Document::new();
    if let Some(price) = &patch.price {
        set.insert("price", price.as_str());
    }
    (!set.is_empty()).then(|| doc! { "$set": set })
}

#[async_trait::async_trait]
impl BookStore for MongoBookStore {
    // ---
    async fn find_many(&self, filter: &BookFilter, limit: Option<usize>) -> Result<Vec<Book>> {
        // ---
        let mut find = self.collection.find(filter_document(filter));
        if let Some(limit) = limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await.context("find failed")?;
        let documents: Vec<BookDocument> =
            cursor.try_collect().await.context("cursor decode failed")?;
        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>> {
        // ---
        let document = self
            .collection
            .find_one(filter_document(filter))
            .await
            .context("find_one failed")?;
        Ok(document.map(Book::from))
    }

    async fn insert_one(&self, book: Book) -> Result<()> {
        // ---
        let result = self
            .collection
            .insert_one(BookDocument::from(book))
            .await
            .context("insert_one failed")?;
        tracing::debug!("Book had been inserted: {}", result.inserted_id);
        Ok(())
    }

    async fn insert_many(&self, books: Vec<Book>) -> Result<usize> {
        // ---
        // The driver rejects an empty batch
        if books.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .insert_many(books.into_iter().map(BookDocument::from))
            .await
            .context("insert_many failed")?;
        Ok(result.inserted_ids.len())
    }

    async fn update_one(&self, filter: &BookFilter, patch: BookPatch) -> Result<UpdateOutcome> {
        // ---
        let Some(update) = set_document(&patch) else {
            // An empty $set is rejected by the server; report the match only
            let matched = self.find_one(filter).await?.is_some();
            return Ok(UpdateOutcome {
                matched: u64::from(matched),
                modified: 0,
            });
        };

        let result = self
            .collection
            .update_one(filter_document(filter), update)
            .await
            .context("update_one failed")?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_many(&self, filter: &BookFilter) -> Result<u64> {
        // ---
        let result = self
            .collection
            .delete_many(filter_document(filter))
            .await
            .context("delete_many failed")?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn filters_translate_to_equality_documents() {
        // ---
        assert_eq!(filter_document(&BookFilter::All), doc! {});
        assert_eq!(filter_document(&BookFilter::Id("9".into())), doc! { "id": "9" });
        assert_eq!(
            filter_document(&BookFilter::Isbn("111".into())),
            doc! { "isbn": "111" }
        );
    }

    #[test]
    fn patch_sets_price_only() {
        // ---
        assert_eq!(
            set_document(&BookPatch::price("5$")),
            Some(doc! { "$set": { "price": "5$" } })
        );
        assert_eq!(set_document(&BookPatch::default()), None);
    }

    #[test]
    fn stored_documents_use_lowercase_fields() {
        // ---
        let book = crate::domain::seed_books().remove(2);
        let mut document = mongodb::bson::to_document(&BookDocument::from(book.clone())).unwrap();
        assert_eq!(document.get_str("isbn").unwrap(), "360123401");
        assert_eq!(
            document.get_document("author").unwrap(),
            &doc! { "firstname": "John", "lastname": "Doe" }
        );

        // Stored documents carry a server-assigned _id which the model ignores
        document.insert("_id", mongodb::bson::oid::ObjectId::new());
        let decoded: BookDocument = mongodb::bson::from_document(document).unwrap();
        assert_eq!(Book::from(decoded), book);
    }
}
