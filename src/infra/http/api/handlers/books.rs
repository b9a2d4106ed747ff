//! Book handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use bookshelf_api_types::CreateBookRequest;

use crate::application::books::CreateBookCommand;

use super::{cached_json_response, json_to_api, library_to_api, path_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn create_book(
    State(state): State<ApiState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(json_to_api)?;
    let book = state
        .books
        .create(CreateBookCommand {
            author_id: request.author_id,
            name: request.name,
            year_published: request.year_published,
        })
        .await
        .map_err(library_to_api)?;

    Ok(Json(book))
}

pub async fn get_book(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let book = state.books.get(id).await.map_err(library_to_api)?;
    Ok(Json(book))
}

pub async fn get_book_cached(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let cached = state.books.get_cached(id).await.map_err(library_to_api)?;
    Ok(cached_json_response(cached))
}

pub async fn get_book_overview(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let overview = state.books.overview(id).await.map_err(library_to_api)?;
    Ok(Json(overview))
}
