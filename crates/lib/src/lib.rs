//! # Cheap Grocery Shopper
//!
//! This crate holds the domain model of the shopper service (stores, the items
//! they sell, and recipes), the storage layer that persists them in a local
//! SQLite database, and the pricing logic that finds the cheapest store able to
//! supply every ingredient of a recipe.

pub mod errors;
pub mod pricing;
pub mod providers;
pub mod types;

pub use errors::ShopperError;
pub use pricing::{find_cheapest_store, quote_store, CheapestStore, NoCompleteStore, StorePrice};
pub use providers::db::{sqlite::SqliteProvider, storage::Storage};
pub use types::{
    HealthStatus, Item, NewIngredient, NewItem, NewRecipe, NewStore, Recipe, RecipeIngredient,
    Store,
};
