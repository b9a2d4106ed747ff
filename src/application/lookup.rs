//! Read-through lookups over the entity cache.
//!
//! On a hit the stored bytes are returned untouched; they are never decoded
//! or checked against the store. On a miss the entity is loaded, encoded
//! once, and the same bytes are both written back and returned.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::error::LibraryError;
use crate::application::repos::RepoError;
use crate::cache::{CacheKey, EntityCache};
use crate::domain::types::EntityKind;

/// Where a cached-endpoint body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Bypass,
}

impl CacheOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Bypass => "bypass",
        }
    }
}

/// JSON body ready to send, plus how it was obtained.
#[derive(Debug, Clone)]
pub struct CachedJson {
    pub body: Bytes,
    pub outcome: CacheOutcome,
}

#[derive(Clone, Default)]
pub struct ReadThrough {
    cache: Option<Arc<dyn EntityCache>>,
}

impl ReadThrough {
    pub fn new(cache: Option<Arc<dyn EntityCache>>) -> Self {
        Self { cache }
    }

    pub fn disabled() -> Self {
        Self { cache: None }
    }

    /// Serve `kind`/`id` from the cache, or load it with `load` and populate
    /// the cache with its JSON encoding.
    pub async fn fetch<T, F, Fut>(
        &self,
        kind: EntityKind,
        id: i64,
        load: F,
    ) -> Result<CachedJson, LibraryError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, RepoError>>,
    {
        let key = CacheKey::entity(kind, id);

        if let Some(body) = self.lookup(kind, &key).await {
            return Ok(CachedJson {
                body,
                outcome: CacheOutcome::Hit,
            });
        }

        let entity = load()
            .await?
            .ok_or_else(|| LibraryError::not_found(kind, id))?;
        let body = serde_json::to_vec(&entity)
            .map(Bytes::from)
            .map_err(|source| LibraryError::Serialization { kind, id, source })?;

        let outcome = match self.cache.as_ref() {
            Some(cache) => {
                self.populate(cache.as_ref(), kind, &key, body.clone()).await;
                CacheOutcome::Miss
            }
            None => CacheOutcome::Bypass,
        };

        Ok(CachedJson { body, outcome })
    }

    async fn lookup(&self, kind: EntityKind, key: &CacheKey) -> Option<Bytes> {
        let cache = self.cache.as_ref()?;
        let backend = cache.backend();

        match cache.get(key.as_str()).await {
            Ok(Some(body)) => {
                counter!("bookshelf_cache_hit_total", "kind" => kind.as_str()).increment(1);
                debug!(target = "bookshelf::cache", key = %key, backend, "cache hit");
                Some(body)
            }
            Ok(None) => {
                counter!("bookshelf_cache_miss_total", "kind" => kind.as_str()).increment(1);
                None
            }
            Err(err) => {
                counter!("bookshelf_cache_error_total", "op" => "get").increment(1);
                counter!("bookshelf_cache_miss_total", "kind" => kind.as_str()).increment(1);
                warn!(
                    target = "bookshelf::cache",
                    key = %key,
                    backend,
                    error = %err,
                    "cache read failed; reading through to the store"
                );
                None
            }
        }
    }

    async fn populate(&self, cache: &dyn EntityCache, kind: EntityKind, key: &CacheKey, body: Bytes) {
        match cache.set(key.as_str(), body).await {
            Ok(()) => {
                counter!("bookshelf_cache_store_total", "kind" => kind.as_str()).increment(1);
            }
            Err(err) => {
                counter!("bookshelf_cache_error_total", "op" => "set").increment(1);
                warn!(
                    target = "bookshelf::cache",
                    key = %key,
                    backend = cache.backend(),
                    error = %err,
                    "cache write failed; response served uncached"
                );
            }
        }
    }
}
