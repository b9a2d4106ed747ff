use async_trait::async_trait;

use crate::{
    application::repos::{AuthorsRepo, AuthorsWriteRepo, CreateAuthorParams, RepoError},
    domain::entities::{Author, AuthorOverview, Book},
};

use super::{PostgresRepositories, books::BookRow, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    year_born: i32,
}

impl From<AuthorRow> for AuthorOverview {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year_born: row.year_born,
        }
    }
}

impl AuthorRow {
    fn with_books(self, books: Vec<Book>) -> Author {
        Author {
            id: self.id,
            name: self.name,
            year_born: self.year_born,
            books,
        }
    }
}

#[async_trait]
impl AuthorsRepo for PostgresRepositories {
    async fn find_author_with_books(&self, id: i64) -> Result<Option<Author>, RepoError> {
        let Some(author) = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, year_born
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        else {
            return Ok(None);
        };

        let books = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, name, year_published, data, author_id
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Some(
            author.with_books(books.into_iter().map(Book::from).collect()),
        ))
    }

    async fn find_author_overview(&self, id: i64) -> Result<Option<AuthorOverview>, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, year_born
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AuthorOverview::from))
    }
}

#[async_trait]
impl AuthorsWriteRepo for PostgresRepositories {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (name, year_born)
            VALUES ($1, $2)
            RETURNING id, name, year_born
            "#,
        )
        .bind(&params.name)
        .bind(params.year_born)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.with_books(Vec::new()))
    }
}
