//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Author, AuthorOverview, Book, BookOverview};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuthorParams {
    pub name: String,
    pub year_born: i32,
}

#[derive(Debug, Clone)]
pub struct CreateBookParams {
    pub author_id: i64,
    pub name: String,
    pub year_published: i32,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait AuthorsRepo: Send + Sync {
    /// Author with every book it owns, ordered by book id.
    async fn find_author_with_books(&self, id: i64) -> Result<Option<Author>, RepoError>;

    /// Author columns only; books are not loaded.
    async fn find_author_overview(&self, id: i64) -> Result<Option<AuthorOverview>, RepoError>;
}

#[async_trait]
pub trait AuthorsWriteRepo: Send + Sync {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author, RepoError>;
}

#[async_trait]
pub trait BooksRepo: Send + Sync {
    /// Book with its author populated.
    async fn find_book_with_author(&self, id: i64) -> Result<Option<Book>, RepoError>;

    /// Book columns without the payload or the author.
    async fn find_book_overview(&self, id: i64) -> Result<Option<BookOverview>, RepoError>;
}

#[async_trait]
pub trait BooksWriteRepo: Send + Sync {
    async fn create_book(&self, params: CreateBookParams) -> Result<Book, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
