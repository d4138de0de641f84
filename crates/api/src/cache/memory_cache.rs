use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use lru::LruCache;

use super::{CacheError, CachedResponse, ResponseCache};

/// Capacity used when none is configured.
pub const DEFAULT_MEMORY_ENTRIES: usize = 10_000;

/// In-process cache backend holding a fixed number of responses. Once
/// full, the least recently used entry is evicted.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CachedResponse>>,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.lock();
        f.debug_struct("MemoryCache")
            .field("len", &entries.len())
            .field("capacity", &entries.cap())
            .finish()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_MEMORY_ENTRIES).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map stays consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, CachedResponse>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn fetch(&self, key: &str) -> Result<CachedResponse, CacheError> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::Miss(key.to_string()))
    }

    async fn store(&self, key: &str, entry: CachedResponse) -> Result<(), CacheError> {
        self.lock().put(key.to_string(), entry);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
