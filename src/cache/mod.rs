//! Bookshelf read-through cache.
//!
//! Stores pre-serialized JSON snapshots of catalogue entities under
//! `"<kind>-<id>"` keys. Entries never expire; the backend decides when
//! something is evicted.
//!
//! ## Configuration
//!
//! The backend is chosen in `bookshelf.toml`:
//!
//! ```toml
//! [cache]
//! backend = "memory"        # memory | redis | disabled
//! memory_capacity = 10000
//! redis_url = "redis://127.0.0.1:6379"
//! redis_connect_timeout_ms = 1000
//! redis_response_timeout_ms = 500
//! ```

mod config;
mod keys;
mod remote;
mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::CacheSettings;

pub use config::{CacheBackend, DEFAULT_MEMORY_CAPACITY, DEFAULT_REDIS_URL};
pub use keys::CacheKey;
pub use remote::RedisCache;
pub use store::{CacheError, EntityCache, MemoryCache};

/// Build the configured cache backend. `None` means caching is disabled.
pub fn build_cache(
    settings: &CacheSettings,
) -> Result<Option<Arc<dyn EntityCache>>, CacheError> {
    let cache: Option<Arc<dyn EntityCache>> = match settings.backend {
        CacheBackend::Disabled => None,
        CacheBackend::Memory => Some(Arc::new(MemoryCache::new(settings.memory_capacity))),
        CacheBackend::Redis => Some(Arc::new(RedisCache::open(
            &settings.redis_url,
            settings.redis_connect_timeout,
            settings.redis_response_timeout,
        )?)),
    };

    info!(
        target = "bookshelf::cache",
        backend = settings.backend.as_str(),
        "Cache backend configured"
    );

    Ok(cache)
}
