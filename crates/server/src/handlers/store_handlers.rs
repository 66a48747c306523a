//! # Store Route Handlers

use super::{parse_payload, AppError, AppState, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shopper::{NewStore, Store};
use tracing::info;

/// `GET /api/stores`: every store with its items.
pub async fn list_stores_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Store>>, AppError> {
    let stores = app_state
        .storage
        .list_stores()
        .await
        .map_err(AppError::failed("Failed to fetch stores"))?;
    Ok(Json(stores))
}

/// `POST /api/stores`: creates a store from `{ name, location? }`.
pub async fn create_store_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Store>), AppError> {
    const FAILED: &str = "Failed to create store";
    info!("Received create store payload: '{}'", payload);

    let new_store: NewStore = parse_payload(payload, FAILED)?;
    let store = app_state
        .storage
        .create_store(new_store)
        .await
        .map_err(AppError::failed(FAILED))?;

    Ok((StatusCode::CREATED, Json(store)))
}

/// `GET /api/stores/{id}`: one store with its items.
pub async fn get_store_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Store>, AppError> {
    app_state
        .storage
        .get_store(&id)
        .await
        .map_err(AppError::failed("Failed to fetch store"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
}
