//! # Recipe Route Handlers
//!
//! Recipe creation and lookup, plus the cheapest-store query that prices a
//! recipe at every store.

use super::{parse_payload, AppError, AppState, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shopper::{find_cheapest_store, CheapestStore, NewRecipe, Recipe};
use tracing::info;

fn recipe_not_found() -> AppError {
    AppError::NotFound("Recipe not found".to_string())
}

/// `GET /api/recipes`: every recipe with its ingredients.
pub async fn list_recipes_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = app_state
        .storage
        .list_recipes()
        .await
        .map_err(AppError::failed("Failed to fetch recipes"))?;
    Ok(Json(recipes))
}

/// `POST /api/recipes`: creates a recipe from
/// `{ name, description?, ingredients: [{ itemName, quantity, unit }] }`.
pub async fn create_recipe_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    const FAILED: &str = "Failed to create recipe";
    info!("Received create recipe payload: '{}'", payload);

    let new_recipe: NewRecipe = parse_payload(payload, FAILED)?;
    let recipe = app_state
        .storage
        .create_recipe(new_recipe)
        .await
        .map_err(AppError::failed(FAILED))?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `GET /api/recipes/{id}`: one recipe with its ingredients.
pub async fn get_recipe_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    app_state
        .storage
        .get_recipe(&id)
        .await
        .map_err(AppError::failed("Failed to fetch recipe"))?
        .map(Json)
        .ok_or_else(recipe_not_found)
}

/// `GET /api/recipes/{id}/cheapest-store`
///
/// Responds with the cheapest store stocking every ingredient, or, when no
/// store does, with every store's quote and an explanatory message.
pub async fn cheapest_store_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CheapestStore>, AppError> {
    const FAILED: &str = "Failed to find cheapest store";
    info!("Received cheapest store request for recipe: {}", id);

    let recipe = app_state
        .storage
        .get_recipe(&id)
        .await
        .map_err(AppError::failed(FAILED))?
        .ok_or_else(recipe_not_found)?;

    let stores = app_state
        .storage
        .list_stores()
        .await
        .map_err(AppError::failed(FAILED))?;

    let ingredients = recipe.ingredients.unwrap_or_default();
    let outcome = find_cheapest_store(stores, &ingredients);
    match &outcome {
        CheapestStore::Found(price) => info!(
            recipe_id = %id,
            store_id = %price.store.id,
            total_price = price.total_price,
            "Found cheapest store."
        ),
        CheapestStore::NoCompleteStore(none) => info!(
            recipe_id = %id,
            stores = none.store_prices.len(),
            "No store has all ingredients."
        ),
    }

    Ok(Json(outcome))
}
