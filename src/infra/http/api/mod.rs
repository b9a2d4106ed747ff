pub mod error;
pub mod handlers;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    routing::{get, post},
};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/authors", post(handlers::create_author))
        .route("/authors/{id}", get(handlers::get_author))
        .route("/authors/{id}/cached", get(handlers::get_author_cached))
        .route("/authors/{id}/overview", get(handlers::get_author_overview))
        .route("/books", post(handlers::create_book))
        .route("/books/{id}", get(handlers::get_book))
        .route("/books/{id}/cached", get(handlers::get_book_cached))
        .route("/books/{id}/overview", get(handlers::get_book_overview))
        .route("/health/live", get(handlers::live))
        .route("/health/ready", get(handlers::ready))
        .with_state(state)
}
