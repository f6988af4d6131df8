//! API Routes
//!
//! Configures the Axum router with all demo endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    calls_handler, health_handler, page_handler, retrieve_handler, store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /values` - Store a value under a generated key
/// - `GET /values/:key` - Retrieve a value (`?as=text|integer|raw`)
/// - `GET /calls/:operation` - Call count and history of an operation
/// - `GET /pages?url=...` - Fetch a page through the expiring cache
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/values", put(store_handler))
        .route("/values/:key", get(retrieve_handler))
        .route("/calls/:operation", get(calls_handler))
        .route("/pages", get(page_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
