//! # General Route Handlers

use axum::Json;
use shopper::HealthStatus;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "shopper server is running."
}

/// The handler for the health check (`/api/health`) endpoint.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
