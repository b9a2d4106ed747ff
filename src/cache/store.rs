//! Cache storage contract and the in-process backend.

use std::num::NonZeroUsize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use metrics::counter;
use thiserror::Error;
use tracing::warn;

const SOURCE: &str = "cache::store";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache command failed: {0}")]
    Command(String),
    #[error("invalid cache configuration: {0}")]
    Configuration(String),
}

/// Byte-blob store addressed by string keys.
///
/// Payloads are opaque to the cache; callers decide what the bytes mean.
/// `set` never attaches an expiry.
#[async_trait]
pub trait EntityCache: Send + Sync {
    /// Short backend name for logs and metrics.
    fn backend(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    async fn set(&self, key: &str, payload: Bytes) -> Result<(), CacheError>;
}

/// Bounded in-process cache with least-recently-used eviction.
pub struct MemoryCache {
    entries: RwLock<LruCache<String, Bytes>>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.read("len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look at an entry without touching its recency.
    pub fn peek(&self, key: &str) -> Option<Bytes> {
        self.read("peek").peek(key).cloned()
    }

    fn read(&self, op: &'static str) -> RwLockReadGuard<'_, LruCache<String, Bytes>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!(
                op,
                target_module = SOURCE,
                lock_kind = "rwlock.read",
                result = "poisoned_recovered",
                "Recovered from poisoned cache lock"
            );
            poisoned.into_inner()
        })
    }

    fn write(&self, op: &'static str) -> RwLockWriteGuard<'_, LruCache<String, Bytes>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!(
                op,
                target_module = SOURCE,
                lock_kind = "rwlock.write",
                result = "poisoned_recovered",
                "Recovered from poisoned cache lock"
            );
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl EntityCache for MemoryCache {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        // LRU lookups update recency, so even reads take the write lock.
        Ok(self.write("get").get(key).cloned())
    }

    async fn set(&self, key: &str, payload: Bytes) -> Result<(), CacheError> {
        let evicted = self.write("set").push(key.to_string(), payload);
        if let Some((evicted_key, _)) = evicted
            && evicted_key != key
        {
            counter!("bookshelf_cache_evict_total", "backend" => "memory").increment(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[tokio::test]
    async fn memory_cache_roundtrip() {
        let cache = MemoryCache::new(capacity(4));
        assert!(cache.get("author-1").await.expect("get").is_none());

        cache
            .set("author-1", Bytes::from_static(b"{\"id\":1}"))
            .await
            .expect("set");

        let cached = cache.get("author-1").await.expect("get").expect("hit");
        assert_eq!(cached, Bytes::from_static(b"{\"id\":1}"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn overwriting_a_key_replaces_the_payload() {
        let cache = MemoryCache::new(capacity(4));
        cache.set("book-2", Bytes::from_static(b"old")).await.unwrap();
        cache.set("book-2", Bytes::from_static(b"new")).await.unwrap();

        assert_eq!(cache.peek("book-2"), Some(Bytes::from_static(b"new")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_evicted() {
        let cache = MemoryCache::new(capacity(2));
        cache.set("author-1", Bytes::from_static(b"1")).await.unwrap();
        cache.set("author-2", Bytes::from_static(b"2")).await.unwrap();

        // Touch author-1 so author-2 becomes the eviction candidate.
        assert!(cache.get("author-1").await.unwrap().is_some());
        cache.set("author-3", Bytes::from_static(b"3")).await.unwrap();

        assert!(cache.peek("author-1").is_some());
        assert!(cache.peek("author-2").is_none());
        assert!(cache.peek("author-3").is_some());
    }

    #[tokio::test]
    async fn memory_cache_recovers_from_poisoned_lock() {
        let cache = MemoryCache::new(capacity(2));

        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = cache.entries.write().expect("lock should be acquired");
            panic!("poison cache lock");
        }));

        cache.set("book-1", Bytes::from_static(b"x")).await.unwrap();
        assert!(cache.get("book-1").await.unwrap().is_some());
    }
}
