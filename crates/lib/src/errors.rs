use thiserror::Error;

/// Custom error types for the shopper library.
#[derive(Error, Debug)]
pub enum ShopperError {
    #[error("Storage connection error: {0}")]
    StorageConnection(String),
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("Failed to decode column '{column}': {reason}")]
    Decode { column: &'static str, reason: String },
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
