use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::services::config::{ResolverSettings, DEFAULT_CATALOG_CACHE_CAPACITY};
use crate::services::resolver::models::types::{CandidateEntity, CatalogScope};

/// Caller-owned cache of fetched catalogs keyed by scope.
///
/// Lets repeated single-item searches within a session skip the paged fetch.
/// Nothing in the crate holds one implicitly; workflows only use a cache that
/// is passed in.
pub struct CatalogCache {
    entries: LruCache<CatalogScope, Arc<Vec<CandidateEntity>>>,
}

impl CatalogCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Sized by `catalog_cache_capacity`.
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::new(settings.catalog_cache_capacity)
    }

    pub fn cap(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn get(&mut self, scope: &CatalogScope) -> Option<Arc<Vec<CandidateEntity>>> {
        self.entries.get(scope).cloned()
    }

    pub fn insert(&mut self, scope: CatalogScope, catalog: Arc<Vec<CandidateEntity>>) {
        self.entries.put(scope, catalog);
    }

    pub fn invalidate(&mut self, scope: &CatalogScope) {
        self.entries.pop(scope);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_CACHE_CAPACITY)
    }
}

#[cfg(test)]
#[path = "../tests/state/catalog_cache_tests.rs"]
mod tests;
