use async_trait::async_trait;

use crate::{
    application::repos::{BooksRepo, BooksWriteRepo, CreateBookParams, RepoError},
    domain::entities::{AuthorOverview, Book, BookOverview},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
pub(super) struct BookRow {
    id: i64,
    name: String,
    year_published: i32,
    data: Vec<u8>,
    author_id: i64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year_published: row.year_published,
            data: row.data,
            author_id: row.author_id,
            author: None,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookWithAuthorRow {
    id: i64,
    name: String,
    year_published: i32,
    data: Vec<u8>,
    author_id: i64,
    author_name: String,
    author_year_born: i32,
}

impl From<BookWithAuthorRow> for Book {
    fn from(row: BookWithAuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year_published: row.year_published,
            data: row.data,
            author_id: row.author_id,
            author: Some(AuthorOverview {
                id: row.author_id,
                name: row.author_name,
                year_born: row.author_year_born,
            }),
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookOverviewRow {
    id: i64,
    name: String,
    year_published: i32,
}

impl From<BookOverviewRow> for BookOverview {
    fn from(row: BookOverviewRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year_published: row.year_published,
        }
    }
}

#[async_trait]
impl BooksRepo for PostgresRepositories {
    async fn find_book_with_author(&self, id: i64) -> Result<Option<Book>, RepoError> {
        let row = sqlx::query_as::<_, BookWithAuthorRow>(
            r#"
            SELECT
                b.id,
                b.name,
                b.year_published,
                b.data,
                b.author_id,
                a.name AS author_name,
                a.year_born AS author_year_born
            FROM books b
            INNER JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Book::from))
    }

    async fn find_book_overview(&self, id: i64) -> Result<Option<BookOverview>, RepoError> {
        let row = sqlx::query_as::<_, BookOverviewRow>(
            r#"
            SELECT id, name, year_published
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BookOverview::from))
    }
}

#[async_trait]
impl BooksWriteRepo for PostgresRepositories {
    async fn create_book(&self, params: CreateBookParams) -> Result<Book, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (name, year_published, data, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, year_published, data, author_id
            "#,
        )
        .bind(&params.name)
        .bind(params.year_published)
        .bind(&params.data)
        .bind(params.author_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Book::from(row))
    }
}
