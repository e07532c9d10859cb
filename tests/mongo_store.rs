//! Live MongoDB tests.
//!
//! These need a reachable server and are ignored by default:
//! `BOOKSTORE_MONGODB_HOST=localhost cargo test --test mongo_store -- --ignored`

use anyhow::Result;
use book_store::domain::{seed_books, BookFilter, BookPatch, BookStorePtr};
use book_store::{create_mongo_store, DatabaseConfig};
use serial_test::serial;

async fn connect() -> Result<BookStorePtr> {
    // ---
    let mut config = DatabaseConfig::default();
    if let Ok(host) = std::env::var("BOOKSTORE_MONGODB_HOST") {
        config.host = host;
    }
    config.database = "bookstore_test".to_string();

    let store = create_mongo_store(&config).await?;
    store.delete_many(&BookFilter::All).await?;
    Ok(store)
}

#[tokio::test]
#[serial]
#[ignore = "requires a running MongoDB"]
async fn crud_against_live_server() -> Result<()> {
    // ---
    let store = connect().await?;

    assert_eq!(store.insert_many(seed_books()).await?, 3);
    assert_eq!(store.insert_many(Vec::new()).await?, 0);

    let page = store.find_many(&BookFilter::All, Some(2)).await?;
    assert_eq!(page.len(), 2);

    let found = store
        .find_one(&BookFilter::Isbn("47192038471".into()))
        .await?
        .expect("seeded book");
    assert_eq!(found.id, "2");

    let outcome = store
        .update_one(&BookFilter::Id("2".into()), BookPatch::price("1$"))
        .await?;
    assert_eq!((outcome.matched, outcome.modified), (1, 1));

    let outcome = store
        .update_one(&BookFilter::Id("2".into()), BookPatch::default())
        .await?;
    assert_eq!((outcome.matched, outcome.modified), (1, 0));

    assert_eq!(store.delete_many(&BookFilter::Isbn("9812005321".into())).await?, 1);
    assert_eq!(store.delete_many(&BookFilter::All).await?, 2);
    assert!(store.find_many(&BookFilter::All, None).await?.is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running MongoDB"]
async fn unreachable_server_fails_at_connect() {
    // ---
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..DatabaseConfig::default()
    };

    assert!(create_mongo_store(&config).await.is_err());
}
