use crate::{
    errors::ShopperError,
    types::{Item, NewItem, NewRecipe, NewStore, Recipe, Store},
};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for persisting and loading the shopper's records.
///
/// List operations return records in the order they were created, which is
/// the order the pricing logic relies on to break ties.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Lists every store with its items loaded.
    async fn list_stores(&self) -> Result<Vec<Store>, ShopperError>;

    /// Fetches one store with its items loaded.
    async fn get_store(&self, id: &str) -> Result<Option<Store>, ShopperError>;

    async fn create_store(&self, new_store: NewStore) -> Result<Store, ShopperError>;

    /// Lists every item with the store selling it loaded.
    async fn list_items(&self) -> Result<Vec<Item>, ShopperError>;

    async fn get_item(&self, id: &str) -> Result<Option<Item>, ShopperError>;

    /// Creates an item. Fails with `ShopperError::NotFound` when `store_id`
    /// does not reference an existing store.
    async fn create_item(&self, new_item: NewItem) -> Result<Item, ShopperError>;

    /// Lists every recipe with its ingredients loaded.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ShopperError>;

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, ShopperError>;

    /// Creates a recipe and its ingredients atomically, returning the recipe
    /// with the ingredients loaded.
    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe, ShopperError>;
}

dyn_clone::clone_trait_object!(Storage);
