pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};

use axum::{Router, middleware as axum_middleware};
use tower_http::cors::CorsLayer;

use self::middleware::{log_responses, set_request_context};

/// Full HTTP surface: API routes, request logging, request ids, and CORS.
pub fn build_router(state: ApiState) -> Router {
    build_api_router(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
        .layer(CorsLayer::permissive())
}
