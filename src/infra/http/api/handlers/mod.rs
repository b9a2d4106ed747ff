//! API handlers organized by resource type.
//!
//! Error conversion helpers shared by the resource modules live here.

mod authors;
mod books;
mod health;

pub use authors::*;
pub use books::*;
pub use health::*;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::error::LibraryError;
use crate::application::lookup::CachedJson;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

use super::error::{ApiError, codes};

pub(crate) const CACHE_STATUS_HEADER: &str = "x-cache";

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "invalid input",
            Some(message),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DB_TIMEOUT,
            "database timeout",
            None,
        ),
        RepoError::Persistence(message) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "persistence error",
            Some(message),
        ),
    }
}

pub(crate) fn library_to_api(err: LibraryError) -> ApiError {
    match err {
        LibraryError::Domain(err @ DomainError::NotFound { .. }) => {
            ApiError::not_found("resource not found", Some(err.to_string()))
        }
        LibraryError::Domain(DomainError::Validation { message }) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "invalid input",
            Some(message),
        ),
        err @ LibraryError::Serialization { .. } => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::SERIALIZATION,
            "failed to encode response",
            Some(err.to_string()),
        ),
        LibraryError::Repo(repo) => repo_to_api(repo),
    }
}

pub(crate) fn path_to_api(rejection: PathRejection) -> ApiError {
    ApiError::bad_request("invalid id", Some(rejection.body_text()))
}

pub(crate) fn json_to_api(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request("invalid request body", Some(rejection.body_text()))
}

/// Pre-encoded JSON body, sent as-is.
pub(crate) fn cached_json_response(cached: CachedJson) -> Response {
    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        cached.body,
    )
        .into_response();
    response.headers_mut().insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(cached.outcome.as_str()),
    );
    response
}
