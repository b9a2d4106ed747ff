//! Author handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use bookshelf_api_types::CreateAuthorRequest;

use crate::application::authors::CreateAuthorCommand;

use super::{cached_json_response, json_to_api, library_to_api, path_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn create_author(
    State(state): State<ApiState>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(json_to_api)?;
    let author = state
        .authors
        .create(CreateAuthorCommand {
            name: request.name,
            year_born: request.year_born,
        })
        .await
        .map_err(library_to_api)?;

    Ok(Json(author))
}

pub async fn get_author(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let author = state.authors.get(id).await.map_err(library_to_api)?;
    Ok(Json(author))
}

pub async fn get_author_cached(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let cached = state.authors.get_cached(id).await.map_err(library_to_api)?;
    Ok(cached_json_response(cached))
}

pub async fn get_author_overview(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(path_to_api)?;
    let overview = state.authors.overview(id).await.map_err(library_to_api)?;
    Ok(Json(overview))
}
