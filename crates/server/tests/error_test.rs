//! # Storage Failure Tests
//!
//! With a storage backend that always fails, every endpoint answers 500 with
//! its own generic message and nothing about the underlying cause.

mod common;

use anyhow::Result;
use common::TestApp;
use serde_json::{json, Value};
use shopper_test_utils::FailingStorage;
use std::sync::Arc;

async fn spawn_failing() -> Result<(TestApp, FailingStorage)> {
    let storage = FailingStorage::new();
    let app = TestApp::spawn_with_storage(Arc::new(storage.clone())).await?;
    Ok((app, storage))
}

async fn assert_failure(response: reqwest::Response, message: &str) -> Result<()> {
    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "error": message }));
    Ok(())
}

#[tokio::test]
async fn test_list_endpoints_report_fetch_failures() -> Result<()> {
    let (app, storage) = spawn_failing().await?;

    assert_failure(app.get("/api/stores").await?, "Failed to fetch stores").await?;
    assert_failure(app.get("/api/items").await?, "Failed to fetch items").await?;
    assert_failure(app.get("/api/recipes").await?, "Failed to fetch recipes").await?;
    assert_eq!(storage.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_single_record_endpoints_report_fetch_failures() -> Result<()> {
    let (app, _storage) = spawn_failing().await?;

    assert_failure(app.get("/api/stores/s1").await?, "Failed to fetch store").await?;
    assert_failure(app.get("/api/items/i1").await?, "Failed to fetch item").await?;
    assert_failure(app.get("/api/recipes/r1").await?, "Failed to fetch recipe").await?;
    Ok(())
}

#[tokio::test]
async fn test_create_endpoints_report_create_failures() -> Result<()> {
    let (app, storage) = spawn_failing().await?;

    assert_failure(
        app.post_json("/api/stores", &json!({ "name": "Grocer" })).await?,
        "Failed to create store",
    )
    .await?;
    assert_failure(
        app.post_json(
            "/api/items",
            &json!({ "name": "Milk", "price": 1.0, "unit": "l", "storeId": "s1" }),
        )
        .await?,
        "Failed to create item",
    )
    .await?;
    assert_failure(
        app.post_json("/api/recipes", &json!({ "name": "Tea", "ingredients": [] }))
            .await?,
        "Failed to create recipe",
    )
    .await?;
    assert_eq!(storage.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_cheapest_store_reports_failure() -> Result<()> {
    let (app, _storage) = spawn_failing().await?;

    assert_failure(
        app.get("/api/recipes/r1/cheapest-store").await?,
        "Failed to find cheapest store",
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_health_check_does_not_touch_storage() -> Result<()> {
    let (app, storage) = spawn_failing().await?;

    let response = app.get("/api/health").await?;
    assert_eq!(200, response.status().as_u16());
    assert_eq!(storage.call_count(), 0);
    Ok(())
}
