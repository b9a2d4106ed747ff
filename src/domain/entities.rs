//! Catalogue entities as they are stored and served.
//!
//! The wire shapes double as the domain records: there is no field the
//! store keeps that clients do not see.

pub use bookshelf_api_types::{Author, AuthorOverview, Book, BookOverview};

use super::error::DomainError;

/// Reject names that are empty once surrounding whitespace is removed.
pub fn ensure_name(value: &str, entity: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!(
            "{entity} name must not be blank"
        )));
    }
    Ok(trimmed.to_string())
}
