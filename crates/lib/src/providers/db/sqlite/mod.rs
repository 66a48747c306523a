use crate::{
    errors::ShopperError,
    providers::db::storage::Storage,
    types::{Item, NewIngredient, NewItem, NewRecipe, NewStore, Recipe, RecipeIngredient, Store},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    fmt::{self, Debug},
};
use tracing::{debug, error, info, warn};
use turso::{Connection, Database, Row, Value as TursoValue};
use uuid::Uuid;

mod rows;
pub mod sql;

use rows::{
    ingredient_from_row, item_from_row, optional_text_to_sql, recipe_from_row, store_from_row,
    timestamp_to_sql,
};

/// A provider for interacting with a local SQLite database using Turso.
///
/// When cloned, it shares the same underlying database, allowing for concurrent and
/// shared access to the same database file or in-memory instance.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Creates a new `SqliteProvider` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:" for a unique,
    ///   isolated in-memory database. To share an in-memory database, create one
    ///   provider and then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, ShopperError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| ShopperError::StorageConnection(e.to_string()))?;

        // WAL has no effect on in-memory databases but is safe to request.
        let conn = db
            .connect()
            .map_err(|e| ShopperError::StorageConnection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| ShopperError::StorageConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Ensures that all required application tables exist.
    /// This function is idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), ShopperError> {
        let conn = self.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        info!("SQLite schema initialized.");
        Ok(())
    }

    fn connect(&self) -> Result<Connection, ShopperError> {
        self.db
            .connect()
            .map_err(|e| ShopperError::StorageConnection(e.to_string()))
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteProvider {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

/// Runs a query and decodes every returned row.
async fn query_all<T>(
    conn: &Connection,
    sql: &str,
    params: Vec<TursoValue>,
    decode: fn(&Row) -> Result<T, ShopperError>,
) -> Result<Vec<T>, ShopperError> {
    debug!(sql = %sql, params = params.len(), "--> Executing SQLite query");
    let mut rows = if params.is_empty() {
        conn.query(sql, ()).await?
    } else {
        conn.query(sql, params).await?
    };

    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(decode(&row)?);
    }
    Ok(records)
}

async fn query_one<T>(
    conn: &Connection,
    sql: &str,
    id: &str,
    decode: fn(&Row) -> Result<T, ShopperError>,
) -> Result<Option<T>, ShopperError> {
    let records = query_all(conn, sql, vec![TursoValue::Text(id.to_string())], decode).await?;
    Ok(records.into_iter().next())
}

/// Groups records by a foreign key, preserving their order within each group.
fn group_by<T>(records: Vec<T>, key: impl Fn(&T) -> &str) -> HashMap<String, Vec<T>> {
    let mut groups: HashMap<String, Vec<T>> = HashMap::new();
    for record in records {
        groups.entry(key(&record).to_string()).or_default().push(record);
    }
    groups
}

async fn insert_ingredients(
    conn: &Connection,
    recipe_id: &str,
    new_ingredients: Vec<NewIngredient>,
) -> Result<Vec<RecipeIngredient>, ShopperError> {
    let mut ingredients = Vec::with_capacity(new_ingredients.len());
    for new_ingredient in new_ingredients {
        let ingredient = RecipeIngredient {
            id: Uuid::new_v4().to_string(),
            recipe_id: recipe_id.to_string(),
            item_name: new_ingredient.item_name,
            quantity: new_ingredient.quantity,
            unit: new_ingredient.unit,
        };
        conn.execute(
            sql::INSERT_INGREDIENT_SQL,
            vec![
                TursoValue::Text(ingredient.id.clone()),
                TursoValue::Text(ingredient.recipe_id.clone()),
                TursoValue::Text(ingredient.item_name.clone()),
                TursoValue::Real(ingredient.quantity),
                TursoValue::Text(ingredient.unit.clone()),
            ],
        )
        .await?;
        ingredients.push(ingredient);
    }
    Ok(ingredients)
}

#[async_trait]
impl Storage for SqliteProvider {
    async fn list_stores(&self) -> Result<Vec<Store>, ShopperError> {
        let conn = self.connect()?;
        let mut stores = query_all(&conn, &sql::select_stores(), Vec::new(), store_from_row).await?;
        let items = query_all(&conn, &sql::select_items(), Vec::new(), item_from_row).await?;

        let mut items_by_store = group_by(items, |item| item.store_id.as_str());
        for store in &mut stores {
            store.items = Some(items_by_store.remove(&store.id).unwrap_or_default());
        }

        debug!(count = stores.len(), "Loaded stores with items.");
        Ok(stores)
    }

    async fn get_store(&self, id: &str) -> Result<Option<Store>, ShopperError> {
        let conn = self.connect()?;
        let Some(mut store) =
            query_one(&conn, &sql::select_store_by_id(), id, store_from_row).await?
        else {
            return Ok(None);
        };

        let items = query_all(
            &conn,
            &sql::select_items_by_store(),
            vec![TursoValue::Text(id.to_string())],
            item_from_row,
        )
        .await?;
        store.items = Some(items);
        Ok(Some(store))
    }

    async fn create_store(&self, new_store: NewStore) -> Result<Store, ShopperError> {
        let conn = self.connect()?;
        let now = rows::now();
        let store = Store {
            id: Uuid::new_v4().to_string(),
            name: new_store.name,
            location: new_store.location,
            created_at: now,
            updated_at: now,
            items: None,
        };

        conn.execute(
            sql::INSERT_STORE_SQL,
            vec![
                TursoValue::Text(store.id.clone()),
                TursoValue::Text(store.name.clone()),
                optional_text_to_sql(store.location.clone()),
                TursoValue::Text(timestamp_to_sql(&store.created_at)),
                TursoValue::Text(timestamp_to_sql(&store.updated_at)),
            ],
        )
        .await?;

        info!(store_id = %store.id, name = %store.name, "Created store.");
        Ok(store)
    }

    async fn list_items(&self) -> Result<Vec<Item>, ShopperError> {
        let conn = self.connect()?;
        let mut items = query_all(&conn, &sql::select_items(), Vec::new(), item_from_row).await?;
        let stores: HashMap<String, Store> =
            query_all(&conn, &sql::select_stores(), Vec::new(), store_from_row)
                .await?
                .into_iter()
                .map(|store| (store.id.clone(), store))
                .collect();

        for item in &mut items {
            match stores.get(&item.store_id) {
                Some(store) => item.store = Some(Box::new(store.clone())),
                None => warn!(
                    item_id = %item.id,
                    store_id = %item.store_id,
                    "Item references a missing store."
                ),
            }
        }

        debug!(count = items.len(), "Loaded items with stores.");
        Ok(items)
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>, ShopperError> {
        let conn = self.connect()?;
        let Some(mut item) = query_one(&conn, &sql::select_item_by_id(), id, item_from_row).await?
        else {
            return Ok(None);
        };

        item.store = query_one(&conn, &sql::select_store_by_id(), &item.store_id, store_from_row)
            .await?
            .map(Box::new);
        Ok(Some(item))
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item, ShopperError> {
        let conn = self.connect()?;

        // The embedded engine does not enforce foreign keys, so check the store here.
        if query_one(&conn, &sql::select_store_by_id(), &new_item.store_id, store_from_row)
            .await?
            .is_none()
        {
            return Err(ShopperError::NotFound {
                entity: "store",
                id: new_item.store_id,
            });
        }

        let now = rows::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: new_item.name,
            price: new_item.price,
            unit: new_item.unit,
            store_id: new_item.store_id,
            created_at: now,
            updated_at: now,
            store: None,
        };

        conn.execute(
            sql::INSERT_ITEM_SQL,
            vec![
                TursoValue::Text(item.id.clone()),
                TursoValue::Text(item.name.clone()),
                TursoValue::Real(item.price),
                TursoValue::Text(item.unit.clone()),
                TursoValue::Text(item.store_id.clone()),
                TursoValue::Text(timestamp_to_sql(&item.created_at)),
                TursoValue::Text(timestamp_to_sql(&item.updated_at)),
            ],
        )
        .await?;

        info!(item_id = %item.id, store_id = %item.store_id, name = %item.name, "Created item.");
        Ok(item)
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ShopperError> {
        let conn = self.connect()?;
        let mut recipes =
            query_all(&conn, &sql::select_recipes(), Vec::new(), recipe_from_row).await?;
        let ingredients =
            query_all(&conn, &sql::select_ingredients(), Vec::new(), ingredient_from_row).await?;

        let mut ingredients_by_recipe =
            group_by(ingredients, |ingredient| ingredient.recipe_id.as_str());
        for recipe in &mut recipes {
            recipe.ingredients = Some(ingredients_by_recipe.remove(&recipe.id).unwrap_or_default());
        }

        debug!(count = recipes.len(), "Loaded recipes with ingredients.");
        Ok(recipes)
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, ShopperError> {
        let conn = self.connect()?;
        let Some(mut recipe) =
            query_one(&conn, &sql::select_recipe_by_id(), id, recipe_from_row).await?
        else {
            return Ok(None);
        };

        let ingredients = query_all(
            &conn,
            &sql::select_ingredients_by_recipe(),
            vec![TursoValue::Text(id.to_string())],
            ingredient_from_row,
        )
        .await?;
        recipe.ingredients = Some(ingredients);
        Ok(Some(recipe))
    }

    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe, ShopperError> {
        let conn = self.connect()?;
        let now = rows::now();
        let mut recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            name: new_recipe.name,
            description: new_recipe.description,
            created_at: now,
            updated_at: now,
            ingredients: None,
        };

        info!(
            "Starting database transaction to create recipe '{}' with {} ingredients.",
            recipe.name,
            new_recipe.ingredients.len()
        );
        let new_ingredients = new_recipe.ingredients;
        conn.execute("BEGIN TRANSACTION", ()).await?;

        let inserted = async {
            conn.execute(
                sql::INSERT_RECIPE_SQL,
                vec![
                    TursoValue::Text(recipe.id.clone()),
                    TursoValue::Text(recipe.name.clone()),
                    optional_text_to_sql(recipe.description.clone()),
                    TursoValue::Text(timestamp_to_sql(&recipe.created_at)),
                    TursoValue::Text(timestamp_to_sql(&recipe.updated_at)),
                ],
            )
            .await?;
            insert_ingredients(&conn, &recipe.id, new_ingredients).await
        }
        .await;

        match inserted {
            Ok(ingredients) => {
                conn.execute("COMMIT", ()).await?;
                recipe.ingredients = Some(ingredients);
            }
            Err(e) => {
                warn!("Rolling back recipe creation: {e}");
                if let Err(rollback_err) = conn.execute("ROLLBACK", ()).await {
                    error!("Failed to roll back recipe creation: {rollback_err}");
                }
                return Err(e);
            }
        }

        info!(recipe_id = %recipe.id, "Transaction committed. Created recipe.");
        Ok(recipe)
    }
}
