//! Cache configuration.
//!
//! Backend selection and defaults for the `[cache]` section of `bookshelf.toml`.

pub const DEFAULT_MEMORY_CAPACITY: usize = 10_000;
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Cached endpoints always read through to the store.
    Disabled,
    /// In-process LRU map.
    Memory,
    /// External Redis server.
    Redis,
}

impl CacheBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheBackend::Disabled => "disabled",
            CacheBackend::Memory => "memory",
            CacheBackend::Redis => "redis",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Some(CacheBackend::Disabled),
            "memory" => Some(CacheBackend::Memory),
            "redis" => Some(CacheBackend::Redis),
            _ => None,
        }
    }
}
