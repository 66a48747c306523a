//! # SQLite Specific SQL Queries
//!
//! This module centralizes the schema and query strings for the SQLite provider.
//! Timestamps are stored as RFC 3339 text, so ordering by `created_at` and then
//! `rowid` yields insertion order.

pub const CREATE_STORES_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS stores (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        location TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

pub const CREATE_ITEMS_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS items (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        unit TEXT NOT NULL,
        store_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (store_id) REFERENCES stores(id) ON DELETE CASCADE
    );
";

pub const CREATE_RECIPES_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS recipes (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

pub const CREATE_RECIPE_INGREDIENTS_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS recipe_ingredients (
        id TEXT PRIMARY KEY,
        recipe_id TEXT NOT NULL,
        item_name TEXT NOT NULL,
        quantity REAL NOT NULL,
        unit TEXT NOT NULL,
        FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
    );
";

/// Every table the application needs, in dependency order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_STORES_TABLE_SQL,
    CREATE_ITEMS_TABLE_SQL,
    CREATE_RECIPES_TABLE_SQL,
    CREATE_RECIPE_INGREDIENTS_TABLE_SQL,
];

pub const STORE_COLUMNS: &str = "id, name, location, created_at, updated_at";
pub const ITEM_COLUMNS: &str = "id, name, price, unit, store_id, created_at, updated_at";
pub const RECIPE_COLUMNS: &str = "id, name, description, created_at, updated_at";
pub const INGREDIENT_COLUMNS: &str = "id, recipe_id, item_name, quantity, unit";

pub fn select_stores() -> String {
    format!("SELECT {STORE_COLUMNS} FROM stores ORDER BY created_at ASC, rowid ASC")
}

pub fn select_store_by_id() -> String {
    format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1")
}

pub fn select_items() -> String {
    format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at ASC, rowid ASC")
}

pub fn select_items_by_store() -> String {
    format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE store_id = ?1 ORDER BY created_at ASC, rowid ASC"
    )
}

pub fn select_item_by_id() -> String {
    format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1")
}

pub fn select_recipes() -> String {
    format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at ASC, rowid ASC")
}

pub fn select_recipe_by_id() -> String {
    format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1")
}

pub fn select_ingredients() -> String {
    format!("SELECT {INGREDIENT_COLUMNS} FROM recipe_ingredients ORDER BY rowid ASC")
}

pub fn select_ingredients_by_recipe() -> String {
    format!(
        "SELECT {INGREDIENT_COLUMNS} FROM recipe_ingredients \
         WHERE recipe_id = ?1 ORDER BY rowid ASC"
    )
}

pub const INSERT_STORE_SQL: &str =
    "INSERT INTO stores (id, name, location, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";

pub const INSERT_ITEM_SQL: &str = "INSERT INTO items \
    (id, name, price, unit, store_id, created_at, updated_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

pub const INSERT_RECIPE_SQL: &str = "INSERT INTO recipes \
    (id, name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";

pub const INSERT_INGREDIENT_SQL: &str = "INSERT INTO recipe_ingredients \
    (id, recipe_id, item_name, quantity, unit) VALUES (?1, ?2, ?3, ?4, ?5)";
