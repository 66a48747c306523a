//! # Item Route Handlers

use super::{parse_payload, AppError, AppState, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shopper::{Item, NewItem};
use tracing::info;

/// `GET /api/items`: every item with the store selling it.
pub async fn list_items_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Item>>, AppError> {
    let items = app_state
        .storage
        .list_items()
        .await
        .map_err(AppError::failed("Failed to fetch items"))?;
    Ok(Json(items))
}

/// `POST /api/items`: creates an item from `{ name, price, unit, storeId }`.
///
/// An unknown `storeId` fails like any other error of this endpoint.
pub async fn create_item_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Item>), AppError> {
    const FAILED: &str = "Failed to create item";
    info!("Received create item payload: '{}'", payload);

    let new_item: NewItem = parse_payload(payload, FAILED)?;
    let item = app_state
        .storage
        .create_item(new_item)
        .await
        .map_err(AppError::failed(FAILED))?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /api/items/{id}`: one item with its store.
pub async fn get_item_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    app_state
        .storage
        .get_item(&id)
        .await
        .map_err(AppError::failed("Failed to fetch item"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}
