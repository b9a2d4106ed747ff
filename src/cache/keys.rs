//! Cache key definitions.

use std::fmt;

use crate::domain::types::EntityKind;

/// Key of a cached entity snapshot: `"<kind>-<id>"`, e.g. `"author-42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn entity(kind: EntityKind, id: i64) -> Self {
        Self(format!("{}-{id}", kind.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
