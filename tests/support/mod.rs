//! In-memory doubles shared by the router tests.

#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use bytes::Bytes;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use bookshelf::application::authors::AuthorService;
use bookshelf::application::books::BookService;
use bookshelf::application::lookup::ReadThrough;
use bookshelf::application::payload::PayloadGenerator;
use bookshelf::application::repos::{
    AuthorsRepo, AuthorsWriteRepo, BooksRepo, BooksWriteRepo, CreateAuthorParams,
    CreateBookParams, HealthRepo, RepoError,
};
use bookshelf::cache::{CacheError, EntityCache, MemoryCache};
use bookshelf::domain::entities::{Author, AuthorOverview, Book, BookOverview};
use bookshelf::infra::http::{ApiState, build_router};

pub const MAX_PAYLOAD: usize = 256;

#[derive(Default)]
pub struct MemoryStore {
    authors: Mutex<Vec<AuthorOverview>>,
    books: Mutex<Vec<Book>>,
    reads: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("connection refused"));
        }
        Ok(())
    }

    fn read(&self) -> Result<(), RepoError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()
    }

    async fn author(&self, id: i64) -> Option<AuthorOverview> {
        let authors = self.authors.lock().await;
        authors.iter().find(|author| author.id == id).cloned()
    }
}

#[async_trait]
impl AuthorsRepo for MemoryStore {
    async fn find_author_with_books(&self, id: i64) -> Result<Option<Author>, RepoError> {
        self.read()?;
        let Some(author) = self.author(id).await else {
            return Ok(None);
        };
        let books = self.books.lock().await;
        Ok(Some(Author {
            id: author.id,
            name: author.name,
            year_born: author.year_born,
            books: books
                .iter()
                .filter(|book| book.author_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn find_author_overview(&self, id: i64) -> Result<Option<AuthorOverview>, RepoError> {
        self.read()?;
        Ok(self.author(id).await)
    }
}

#[async_trait]
impl AuthorsWriteRepo for MemoryStore {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author, RepoError> {
        self.check()?;
        let mut authors = self.authors.lock().await;
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
impl BooksRepo for MemoryStore {
    async fn find_book_with_author(&self, id: i64) -> Result<Option<Book>, RepoError> {
        self.read()?;
        let book = {
            let books = self.books.lock().await;
            books.iter().find(|book| book.id == id).cloned()
        };
        let Some(mut book) = book else {
            return Ok(None);
        };
        book.author = self.author(book.author_id).await;
        Ok(Some(book))
    }

    async fn find_book_overview(&self, id: i64) -> Result<Option<BookOverview>, RepoError> {
        self.read()?;
        let books = self.books.lock().await;
        Ok(books.iter().find(|book| book.id == id).map(|book| BookOverview {
            id: book.id,
            name: book.name.clone(),
            year_published: book.year_published,
        }))
    }
}

#[async_trait]
impl BooksWriteRepo for MemoryStore {
    async fn create_book(&self, params: CreateBookParams) -> Result<Book, RepoError> {
        self.check()?;
        let mut books = self.books.lock().await;
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

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.check()
    }
}

/// Cache whose backend can be switched off mid-test.
pub struct FlakyCache {
    inner: MemoryCache,
    down: AtomicBool,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(NonZeroUsize::new(64).expect("non-zero")),
            down: AtomicBool::new(false),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn peek(&self, key: &str) -> Option<Bytes> {
        self.inner.peek(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityCache for FlakyCache {
    fn backend(&self) -> &'static str {
        "flaky"
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, payload: Bytes) -> Result<(), CacheError> {
        self.check()?;
        self.inner.set(key, payload).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<FlakyCache>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let cache = Arc::new(FlakyCache::new());
        let lookup = ReadThrough::new(Some(cache.clone() as Arc<dyn EntityCache>));

        let state = ApiState {
            authors: Arc::new(AuthorService::new(
                store.clone(),
                store.clone(),
                lookup.clone(),
            )),
            books: Arc::new(BookService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                lookup,
                PayloadGenerator::new(MAX_PAYLOAD),
            )),
            health: store.clone(),
        };

        Self {
            router: build_router(state),
            store,
            cache,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, json: &str) -> Response<Body> {
        self.send(Method::POST, uri, Some(json)).await
    }
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}
