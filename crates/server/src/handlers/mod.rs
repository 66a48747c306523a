//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `shopper-server`.
//! The handlers are split into sub-modules by the resource they serve.

pub mod general;
pub mod item_handlers;
pub mod recipe_handlers;
pub mod store_handlers;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use general::*;
pub use item_handlers::*;
pub use recipe_handlers::*;
pub use store_handlers::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shopper::ShopperError;

/// A JSON request body that tolerates a missing or non-JSON `Content-Type`.
///
/// Such bodies are read as `{}`, which then fails payload decoding with the
/// endpoint's own error. Malformed JSON sent as JSON is still rejected with
/// `400 Bad Request`.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Decodes a JSON body into a request payload.
///
/// Bodies are taken as raw JSON and decoded here so that a well-formed body of
/// the wrong shape fails like any other error of the endpoint.
pub(crate) fn parse_payload<T: DeserializeOwned>(
    body: Value,
    message: &'static str,
) -> Result<T, AppError> {
    serde_json::from_value(body)
        .map_err(ShopperError::from)
        .map_err(AppError::failed(message))
}
