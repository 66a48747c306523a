use super::{handlers, state::AppState};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(app_state.config.cors_max_age_secs));

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        .route(
            "/api/stores",
            get(handlers::list_stores_handler).post(handlers::create_store_handler),
        )
        .route("/api/stores/{id}", get(handlers::get_store_handler))
        .route(
            "/api/items",
            get(handlers::list_items_handler).post(handlers::create_item_handler),
        )
        .route("/api/items/{id}", get(handlers::get_item_handler))
        .route(
            "/api/recipes",
            get(handlers::list_recipes_handler).post(handlers::create_recipe_handler),
        )
        .route("/api/recipes/{id}", get(handlers::get_recipe_handler))
        .route(
            "/api/recipes/{id}/cheapest-store",
            get(handlers::cheapest_store_handler),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
