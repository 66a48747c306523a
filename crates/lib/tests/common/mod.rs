#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the library's integration tests: tracing initialization
//! and a fresh in-memory database per test.

use dotenvy::dotenv;
use shopper::{NewItem, NewStore, SqliteProvider, Storage, Store};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

/// Creates an isolated in-memory provider with the schema in place.
pub async fn memory_provider() -> SqliteProvider {
    setup_tracing();
    let provider = SqliteProvider::new(":memory:")
        .await
        .expect("Failed to create SqliteProvider");
    provider
        .initialize_schema()
        .await
        .expect("Failed to initialize schema");
    provider
}

/// Creates a store selling the given `(name, price)` items.
pub async fn store_with_items(
    provider: &SqliteProvider,
    name: &str,
    items: &[(&str, f64)],
) -> Store {
    let store = provider
        .create_store(NewStore {
            name: name.to_string(),
            location: None,
        })
        .await
        .expect("Failed to create store");

    for (item_name, price) in items {
        provider
            .create_item(NewItem {
                name: item_name.to_string(),
                price: *price,
                unit: "each".to_string(),
                store_id: store.id.clone(),
            })
            .await
            .expect("Failed to create item");
    }
    store
}
