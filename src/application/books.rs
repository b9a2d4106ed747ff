use std::sync::Arc;

use tracing::info;

use crate::application::error::LibraryError;
use crate::application::lookup::{CachedJson, ReadThrough};
use crate::application::payload::PayloadGenerator;
use crate::application::repos::{AuthorsRepo, BooksRepo, BooksWriteRepo, CreateBookParams};
use crate::domain::entities::{Book, BookOverview, ensure_name};
use crate::domain::error::DomainError;
use crate::domain::types::EntityKind;

#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub author_id: i64,
    pub name: String,
    pub year_published: i32,
}

#[derive(Clone)]
pub struct BookService {
    reader: Arc<dyn BooksRepo>,
    writer: Arc<dyn BooksWriteRepo>,
    authors: Arc<dyn AuthorsRepo>,
    lookup: ReadThrough,
    payloads: PayloadGenerator,
}

impl BookService {
    pub fn new(
        reader: Arc<dyn BooksRepo>,
        writer: Arc<dyn BooksWriteRepo>,
        authors: Arc<dyn AuthorsRepo>,
        lookup: ReadThrough,
        payloads: PayloadGenerator,
    ) -> Self {
        Self {
            reader,
            writer,
            authors,
            lookup,
            payloads,
        }
    }

    /// Persist a book for an existing author with a freshly generated payload.
    pub async fn create(&self, command: CreateBookCommand) -> Result<Book, LibraryError> {
        let name = ensure_name(&command.name, "book")?;

        if self
            .authors
            .find_author_overview(command.author_id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation(format!(
                "author `{}` does not exist",
                command.author_id
            ))
            .into());
        }

        let data = self.payloads.generate();
        let payload_bytes = data.len();
        let book = self
            .writer
            .create_book(CreateBookParams {
                author_id: command.author_id,
                name,
                year_published: command.year_published,
                data,
            })
            .await?;

        info!(
            target = "bookshelf::application::books",
            book_id = book.id,
            author_id = book.author_id,
            payload_bytes,
            "book created"
        );
        Ok(book)
    }

    /// Book with its author, straight from the store.
    pub async fn get(&self, id: i64) -> Result<Book, LibraryError> {
        self.reader
            .find_book_with_author(id)
            .await?
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, id))
    }

    /// Book with its author as JSON, served from the cache when present.
    pub async fn get_cached(&self, id: i64) -> Result<CachedJson, LibraryError> {
        self.lookup
            .fetch(EntityKind::Book, id, || self.reader.find_book_with_author(id))
            .await
    }

    pub async fn overview(&self, id: i64) -> Result<BookOverview, LibraryError> {
        self.reader
            .find_book_overview(id)
            .await?
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, id))
    }
}
