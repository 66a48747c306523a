use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shopper::ShopperError;
use tracing::error;

/// A custom error type for the server application.
///
/// Every variant renders as `{"error": "<message>"}`. Failures keep the
/// endpoint's generic message for the client and log the underlying cause.
#[derive(Debug)]
pub enum AppError {
    /// The requested record does not exist.
    NotFound(String),
    /// A request failed; `message` is what the client sees.
    Failed {
        message: &'static str,
        source: ShopperError,
    },
}

impl AppError {
    /// Builds a mapper for `map_err` that tags a library error with the
    /// endpoint's client-facing message.
    pub fn failed(message: &'static str) -> impl FnOnce(ShopperError) -> AppError {
        move |source| AppError::Failed { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Failed { message, source } => {
                // Log the original error for debugging purposes
                error!("{message}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
