use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::RatingStore,
};

pub mod recommend;
pub mod similar;
pub mod users;

/// Shared application state: the immutable rating matrix plus configuration.
/// The store is never mutated after startup, so handlers share it without
/// locking.
pub struct AppState {
    pub store: RatingStore,
    pub config: Config,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(users::list))
        .route("/users/:user/similar", get(similar::similar))
        .route("/users/:user/recommendations", get(recommend::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
