//! Decoding of turso rows into domain records.
//!
//! Each `*_from_row` function expects the column order of the matching
//! `*_COLUMNS` constant in `sql.rs`.

use crate::{
    errors::ShopperError,
    types::{Item, Recipe, RecipeIngredient, Store},
};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use turso::{Row, Value as TursoValue};

/// The current time at the precision timestamps are stored with, so a freshly
/// created record equals the same record read back.
pub(super) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Formats a timestamp the way it is stored in the database.
pub(super) fn timestamp_to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(super) fn optional_text_to_sql(value: Option<String>) -> TursoValue {
    value.map(TursoValue::Text).unwrap_or(TursoValue::Null)
}

fn value_kind(value: &TursoValue) -> &'static str {
    match value {
        TursoValue::Null => "NULL",
        TursoValue::Integer(_) => "INTEGER",
        TursoValue::Real(_) => "REAL",
        TursoValue::Text(_) => "TEXT",
        TursoValue::Blob(_) => "BLOB",
    }
}

fn text(row: &Row, idx: usize, column: &'static str) -> Result<String, ShopperError> {
    match row.get_value(idx)? {
        TursoValue::Text(s) => Ok(s),
        other => Err(ShopperError::Decode {
            column,
            reason: format!("expected TEXT, found {}", value_kind(&other)),
        }),
    }
}

fn optional_text(
    row: &Row,
    idx: usize,
    column: &'static str,
) -> Result<Option<String>, ShopperError> {
    match row.get_value(idx)? {
        TursoValue::Null => Ok(None),
        TursoValue::Text(s) => Ok(Some(s)),
        other => Err(ShopperError::Decode {
            column,
            reason: format!("expected TEXT or NULL, found {}", value_kind(&other)),
        }),
    }
}

fn real(row: &Row, idx: usize, column: &'static str) -> Result<f64, ShopperError> {
    match row.get_value(idx)? {
        TursoValue::Real(f) => Ok(f),
        // Whole numbers can come back as integers.
        TursoValue::Integer(i) => Ok(i as f64),
        other => Err(ShopperError::Decode {
            column,
            reason: format!("expected REAL, found {}", value_kind(&other)),
        }),
    }
}

fn timestamp(row: &Row, idx: usize, column: &'static str) -> Result<DateTime<Utc>, ShopperError> {
    let raw = text(row, idx, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| ShopperError::Decode {
            column,
            reason: format!("invalid timestamp '{raw}': {e}"),
        })
}

pub(super) fn store_from_row(row: &Row) -> Result<Store, ShopperError> {
    Ok(Store {
        id: text(row, 0, "stores.id")?,
        name: text(row, 1, "stores.name")?,
        location: optional_text(row, 2, "stores.location")?,
        created_at: timestamp(row, 3, "stores.created_at")?,
        updated_at: timestamp(row, 4, "stores.updated_at")?,
        items: None,
    })
}

pub(super) fn item_from_row(row: &Row) -> Result<Item, ShopperError> {
    Ok(Item {
        id: text(row, 0, "items.id")?,
        name: text(row, 1, "items.name")?,
        price: real(row, 2, "items.price")?,
        unit: text(row, 3, "items.unit")?,
        store_id: text(row, 4, "items.store_id")?,
        created_at: timestamp(row, 5, "items.created_at")?,
        updated_at: timestamp(row, 6, "items.updated_at")?,
        store: None,
    })
}

pub(super) fn recipe_from_row(row: &Row) -> Result<Recipe, ShopperError> {
    Ok(Recipe {
        id: text(row, 0, "recipes.id")?,
        name: text(row, 1, "recipes.name")?,
        description: optional_text(row, 2, "recipes.description")?,
        created_at: timestamp(row, 3, "recipes.created_at")?,
        updated_at: timestamp(row, 4, "recipes.updated_at")?,
        ingredients: None,
    })
}

pub(super) fn ingredient_from_row(row: &Row) -> Result<RecipeIngredient, ShopperError> {
    Ok(RecipeIngredient {
        id: text(row, 0, "recipe_ingredients.id")?,
        recipe_id: text(row, 1, "recipe_ingredients.recipe_id")?,
        item_name: text(row, 2, "recipe_ingredients.item_name")?,
        quantity: real(row, 3, "recipe_ingredients.quantity")?,
        unit: text(row, 4, "recipe_ingredients.unit")?,
    })
}
