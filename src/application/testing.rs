//! In-memory repositories for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::repos::{
    AuthorsRepo, AuthorsWriteRepo, BooksRepo, BooksWriteRepo, CreateAuthorParams,
    CreateBookParams, RepoError,
};
use crate::domain::entities::{Author, AuthorOverview, Book, BookOverview};

#[derive(Default)]
pub(crate) struct InMemoryLibrary {
    authors: Mutex<Vec<AuthorOverview>>,
    books: Mutex<Vec<Book>>,
    reads: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryLibrary {
    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn read(&self) -> Result<(), RepoError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("store offline"));
        }
        Ok(())
    }

    fn author_overview(&self, id: i64) -> Option<AuthorOverview> {
        let authors = self.authors.lock().unwrap();
        authors.iter().find(|author| author.id == id).cloned()
    }
}

#[async_trait]
impl AuthorsRepo for InMemoryLibrary {
    async fn find_author_with_books(&self, id: i64) -> Result<Option<Author>, RepoError> {
        self.read()?;
        let Some(overview) = self.author_overview(id) else {
            return Ok(None);
        };
        let books = self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|book| book.author_id == id)
            .cloned()
            .collect();
        Ok(Some(Author {
            id: overview.id,
            name: overview.name,
            year_born: overview.year_born,
            books,
        }))
    }

    async fn find_author_overview(&self, id: i64) -> Result<Option<AuthorOverview>, RepoError> {
        self.read()?;
        Ok(self.author_overview(id))
    }
}

#[async_trait]
impl AuthorsWriteRepo for InMemoryLibrary {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author, RepoError> {
        let mut authors = self.authors.lock().unwrap();
        let id = authors.len() as i64 + 1;
        authors.push(AuthorOverview {
            id,
            name: params.name.clone(),
            year_born: params.year_born,
        });
        Ok(Author {
            id,
            name: params.name,
            year_born: params.year_born,
            books: Vec::new(),
        })
    }
}

#[async_trait]
impl BooksRepo for InMemoryLibrary {
    async fn find_book_with_author(&self, id: i64) -> Result<Option<Book>, RepoError> {
        self.read()?;
        let book = self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id == id)
            .cloned();
        Ok(book.map(|mut book| {
            book.author = self.author_overview(book.author_id);
            book
        }))
    }

    async fn find_book_overview(&self, id: i64) -> Result<Option<BookOverview>, RepoError> {
        self.read()?;
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|book| book.id == id).map(|book| BookOverview {
            id: book.id,
            name: book.name.clone(),
            year_published: book.year_published,
        }))
    }
}

#[async_trait]
impl BooksWriteRepo for InMemoryLibrary {
    async fn create_book(&self, params: CreateBookParams) -> Result<Book, RepoError> {
        if self.author_overview(params.author_id).is_none() {
            return Err(RepoError::InvalidInput {
                message: format!("author `{}` does not exist", params.author_id),
            });
        }
        let mut books = self.books.lock().unwrap();
        let book = Book {
            id: books.len() as i64 + 1,
            name: params.name,
            year_published: params.year_published,
            data: params.data,
            author_id: params.author_id,
            author: None,
        };
        books.push(book.clone());
        Ok(book)
    }
}
