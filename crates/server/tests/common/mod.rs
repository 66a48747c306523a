//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, backed by a temporary
//! SQLite database file (or by any `Storage` a test hands it), and exposes a
//! `reqwest` client for end-to-end tests of the API endpoints.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::{Client, Response};
use serde_json::Value;
use shopper::{SqliteProvider, Storage};
use shopper_server::{config::AppConfig, router::create_router, state::AppState};
use std::{net::SocketAddr, sync::Arc};
use tempfile::NamedTempFile;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub storage: Arc<dyn Storage>,
    _db_file: Option<NamedTempFile>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server over a fresh, empty SQLite database.
    pub async fn spawn() -> Result<Self> {
        let db_file = NamedTempFile::new()?;
        let db_path = db_file
            .path()
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("temp path is not valid UTF-8"))?
            .to_string();

        let provider = SqliteProvider::new(&db_path).await?;
        provider.initialize_schema().await?;

        let mut app = Self::spawn_with_storage(Arc::new(provider)).await?;
        app._db_file = Some(db_file);
        Ok(app)
    }

    /// Spawns the server over the given storage backend.
    pub async fn spawn_with_storage(storage: Arc<dyn Storage>) -> Result<Self> {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state = AppState::new(AppConfig::default(), storage.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            storage,
            _db_file: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POSTs a body and returns the created record, asserting a 201.
    pub async fn create(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self.post_json(path, body).await?;
        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        assert_eq!(status, 201, "POST {path} failed: {body}");
        Ok(body)
    }

    /// Creates a store selling `(name, price)` items; returns the store id.
    pub async fn seed_store(&self, name: &str, items: &[(&str, f64)]) -> Result<String> {
        let store = self
            .create("/api/stores", &serde_json::json!({ "name": name }))
            .await?;
        let store_id = store["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("store has no id: {store}"))?
            .to_string();

        for (item_name, price) in items {
            self.create(
                "/api/items",
                &serde_json::json!({
                    "name": item_name,
                    "price": price,
                    "unit": "each",
                    "storeId": store_id,
                }),
            )
            .await?;
        }
        Ok(store_id)
    }

    /// Creates a recipe needing `(item_name, quantity)`; returns the recipe id.
    pub async fn seed_recipe(&self, name: &str, ingredients: &[(&str, f64)]) -> Result<String> {
        let ingredients: Vec<Value> = ingredients
            .iter()
            .map(|(item_name, quantity)| {
                serde_json::json!({ "itemName": item_name, "quantity": quantity, "unit": "each" })
            })
            .collect();
        let recipe = self
            .create(
                "/api/recipes",
                &serde_json::json!({ "name": name, "ingredients": ingredients }),
            )
            .await?;
        Ok(recipe["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("recipe has no id: {recipe}"))?
            .to_string())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked.
            let _ = tx.send(());
        }
    }
}
