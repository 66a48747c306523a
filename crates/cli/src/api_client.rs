//! # API Client
//!
//! This module provides a client for interacting with the `shopper-server` API.
//! It handles request construction and response parsing.

use anyhow::{bail, Result};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shopper::{CheapestStore, HealthStatus, Item, NewItem, NewRecipe, NewStore, Recipe, Store};
use tracing::info;

/// The base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// The client for making API calls to the `shopper-server`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new `ApiClient` rooted at `base_url` (e.g. `http://host:3001/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into an error carrying the status and body.
    async fn check(response: Response, action: &str) -> Result<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Failed to {action}. Server responded with {status}: {error_text}");
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, action: &str) -> Result<T> {
        let url = self.url(path);
        info!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response, action).await?.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T> {
        let url = self.url(path);
        info!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Ok(Self::check(response, action).await?.json().await?)
    }

    /// `GET /health`
    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.get_json("/health", "check server health").await
    }

    /// Fetches every store with its items.
    pub async fn get_stores(&self) -> Result<Vec<Store>> {
        self.get_json("/stores", "fetch stores").await
    }

    pub async fn create_store(&self, store: &NewStore) -> Result<Store> {
        self.post_json("/stores", store, "create store").await
    }

    /// Fetches every item with the store selling it.
    pub async fn get_items(&self) -> Result<Vec<Item>> {
        self.get_json("/items", "fetch items").await
    }

    pub async fn create_item(&self, item: &NewItem) -> Result<Item> {
        self.post_json("/items", item, "create item").await
    }

    /// Fetches every recipe with its ingredients.
    pub async fn get_recipes(&self) -> Result<Vec<Recipe>> {
        self.get_json("/recipes", "fetch recipes").await
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe> {
        self.post_json("/recipes", recipe, "create recipe").await
    }

    /// Asks the server where the recipe is cheapest to buy.
    pub async fn find_cheapest_store(&self, recipe_id: &str) -> Result<CheapestStore> {
        self.get_json(
            &format!("/recipes/{recipe_id}/cheapest-store"),
            "find cheapest store",
        )
        .await
    }
}
