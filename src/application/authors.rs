use std::sync::Arc;

use tracing::info;

use crate::application::error::LibraryError;
use crate::application::lookup::{CachedJson, ReadThrough};
use crate::application::repos::{AuthorsRepo, AuthorsWriteRepo, CreateAuthorParams};
use crate::domain::entities::{Author, AuthorOverview, ensure_name};
use crate::domain::types::EntityKind;

#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    pub name: String,
    pub year_born: i32,
}

#[derive(Clone)]
pub struct AuthorService {
    reader: Arc<dyn AuthorsRepo>,
    writer: Arc<dyn AuthorsWriteRepo>,
    lookup: ReadThrough,
}

impl AuthorService {
    pub fn new(
        reader: Arc<dyn AuthorsRepo>,
        writer: Arc<dyn AuthorsWriteRepo>,
        lookup: ReadThrough,
    ) -> Self {
        Self {
            reader,
            writer,
            lookup,
        }
    }

    pub async fn create(&self, command: CreateAuthorCommand) -> Result<Author, LibraryError> {
        let name = ensure_name(&command.name, "author")?;
        let author = self
            .writer
            .create_author(CreateAuthorParams {
                name,
                year_born: command.year_born,
            })
            .await?;

        info!(
            target = "bookshelf::application::authors",
            author_id = author.id,
            "author created"
        );
        Ok(author)
    }

    /// Author with its books, straight from the store.
    pub async fn get(&self, id: i64) -> Result<Author, LibraryError> {
        self.reader
            .find_author_with_books(id)
            .await?
            .ok_or_else(|| LibraryError::not_found(EntityKind::Author, id))
    }

    /// Author with its books as JSON, served from the cache when present.
    pub async fn get_cached(&self, id: i64) -> Result<CachedJson, LibraryError> {
        self.lookup
            .fetch(EntityKind::Author, id, || self.reader.find_author_with_books(id))
            .await
    }

    pub async fn overview(&self, id: i64) -> Result<AuthorOverview, LibraryError> {
        self.reader
            .find_author_overview(id)
            .await?
            .ok_or_else(|| LibraryError::not_found(EntityKind::Author, id))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::application::lookup::CacheOutcome;
    use crate::application::repos::RepoError;
    use crate::application::testing::InMemoryLibrary;
    use crate::cache::MemoryCache;
    use crate::domain::error::DomainError;

    fn service(store: &Arc<InMemoryLibrary>, cache: Option<Arc<MemoryCache>>) -> AuthorService {
        let cache = cache.map(|cache| cache as Arc<dyn crate::cache::EntityCache>);
        AuthorService::new(store.clone(), store.clone(), ReadThrough::new(cache))
    }

    fn ada() -> CreateAuthorCommand {
        CreateAuthorCommand {
            name: "Ada".into(),
            year_born: 1815,
        }
    }

    #[tokio::test]
    async fn created_author_has_fresh_id_and_no_books() {
        let store = Arc::new(InMemoryLibrary::default());
        let service = service(&store, None);

        let first = service.create(ada()).await.expect("create");
        let second = service.create(ada()).await.expect("create");

        assert_eq!(first.id, 1);
        assert!(second.id > first.id);
        assert!(first.books.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_the_store() {
        let store = Arc::new(InMemoryLibrary::default());
        let service = service(&store, None);

        let err = service
            .create(CreateAuthorCommand {
                name: "   ".into(),
                year_born: 1900,
            })
            .await
            .expect_err("blank name");
        assert!(matches!(
            err,
            LibraryError::Domain(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn overview_and_missing_author() {
        let store = Arc::new(InMemoryLibrary::default());
        let service = service(&store, None);
        service.create(ada()).await.unwrap();

        let overview = service.overview(1).await.expect("overview");
        assert_eq!(
            serde_json::to_string(&overview).unwrap(),
            r#"{"id":1,"name":"Ada","yearBorn":1815}"#
        );

        let err = service.get(999).await.expect_err("missing");
        assert!(matches!(
            err,
            LibraryError::Domain(DomainError::NotFound { id: 999, .. })
        ));
    }

    #[tokio::test]
    async fn cached_reads_are_byte_identical_and_skip_the_store() {
        let store = Arc::new(InMemoryLibrary::default());
        let cache = Arc::new(MemoryCache::new(NonZeroUsize::new(16).unwrap()));
        let service = service(&store, Some(cache.clone()));
        service.create(ada()).await.unwrap();

        let first = service.get_cached(1).await.expect("miss");
        let reads = store.reads();
        let second = service.get_cached(1).await.expect("hit");

        assert_eq!(first.outcome, CacheOutcome::Miss);
        assert_eq!(second.outcome, CacheOutcome::Hit);
        assert_eq!(first.body, second.body);
        assert_eq!(store.reads(), reads);
        assert_eq!(cache.peek("author-1"), Some(first.body));
    }

    #[tokio::test]
    async fn cached_hit_survives_a_store_outage() {
        let store = Arc::new(InMemoryLibrary::default());
        let cache = Arc::new(MemoryCache::new(NonZeroUsize::new(16).unwrap()));
        let service = service(&store, Some(cache));
        service.create(ada()).await.unwrap();
        service.get_cached(1).await.expect("populate");

        store.fail_from_now_on();
        assert!(service.get_cached(1).await.is_ok());
        let err = service.get(1).await.expect_err("store offline");
        assert!(matches!(err, LibraryError::Repo(RepoError::Persistence(_))));
    }
}
