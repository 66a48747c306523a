use anyhow::Result;
use async_trait::async_trait;
use shopper::{
    Item, NewIngredient, NewItem, NewRecipe, NewStore, Recipe, ShopperError, SqliteProvider,
    Storage, Store,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// --- Test Setup ---

/// A helper struct to manage database creation for each test.
pub struct TestSetup {
    pub provider: SqliteProvider,
}

impl TestSetup {
    /// Creates a new, isolated in-memory database and initializes the schema.
    pub async fn new() -> Result<Self> {
        let provider = SqliteProvider::new(":memory:").await?;
        provider.initialize_schema().await?;
        Ok(Self { provider })
    }

    /// Row count of a table, for asserting on what a request left behind.
    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        let conn = self.provider.db.connect()?;
        let mut rows = conn
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await?;
        match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                turso::Value::Integer(count) => Ok(count),
                _ => anyhow::bail!("COUNT(*) on '{table}' did not return an integer"),
            },
            None => anyhow::bail!("COUNT(*) on '{table}' returned no rows"),
        }
    }
}

// --- Seed Helpers ---

/// Creates a store selling the given `(name, price)` items, returning it with
/// its items loaded.
pub async fn seed_store(
    storage: &dyn Storage,
    name: &str,
    items: &[(&str, f64)],
) -> Result<Store> {
    let mut store = storage
        .create_store(NewStore {
            name: name.to_string(),
            location: Some(format!("{name} location")),
        })
        .await?;

    let mut created: Vec<Item> = Vec::with_capacity(items.len());
    for (item_name, price) in items {
        created.push(
            storage
                .create_item(NewItem {
                    name: item_name.to_string(),
                    price: *price,
                    unit: "each".to_string(),
                    store_id: store.id.clone(),
                })
                .await?,
        );
    }
    store.items = Some(created);
    Ok(store)
}

/// Creates a recipe needing the given `(item_name, quantity)` ingredients.
pub async fn seed_recipe(
    storage: &dyn Storage,
    name: &str,
    ingredients: &[(&str, f64)],
) -> Result<Recipe> {
    let recipe = storage
        .create_recipe(NewRecipe {
            name: name.to_string(),
            description: None,
            ingredients: ingredients
                .iter()
                .map(|(item_name, quantity)| NewIngredient {
                    item_name: item_name.to_string(),
                    quantity: *quantity,
                    unit: "each".to_string(),
                })
                .collect(),
        })
        .await?;
    Ok(recipe)
}

// --- Failing Storage ---

/// A `Storage` whose every operation fails, for exercising error paths.
#[derive(Clone, Debug, Default)]
pub struct FailingStorage {
    calls: Arc<AtomicUsize>,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many storage operations were attempted.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, ShopperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ShopperError::StorageConnection(
            "FailingStorage: simulated outage".to_string(),
        ))
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn list_stores(&self) -> Result<Vec<Store>, ShopperError> {
        self.fail()
    }

    async fn get_store(&self, _id: &str) -> Result<Option<Store>, ShopperError> {
        self.fail()
    }

    async fn create_store(&self, _new_store: NewStore) -> Result<Store, ShopperError> {
        self.fail()
    }

    async fn list_items(&self) -> Result<Vec<Item>, ShopperError> {
        self.fail()
    }

    async fn get_item(&self, _id: &str) -> Result<Option<Item>, ShopperError> {
        self.fail()
    }

    async fn create_item(&self, _new_item: NewItem) -> Result<Item, ShopperError> {
        self.fail()
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ShopperError> {
        self.fail()
    }

    async fn get_recipe(&self, _id: &str) -> Result<Option<Recipe>, ShopperError> {
        self.fail()
    }

    async fn create_recipe(&self, _new_recipe: NewRecipe) -> Result<Recipe, ShopperError> {
        self.fail()
    }
}
