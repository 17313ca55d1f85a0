//! Nullable cache: a backend that is always down.

use async_trait::async_trait;
use conviction_cache::{CacheError, CacheKey, KvCache};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A [`KvCache`] whose every read and write fails.
///
/// Counts attempts so tests can assert the cache was consulted and its
/// failure swallowed.
#[derive(Default)]
pub struct NullCache {
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl NullCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_attempts(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_attempts(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KvCache for NullCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("null cache".into()))
    }

    async fn set_with_ttl(
        &self,
        _key: &CacheKey,
        _value: String,
        _ttl_secs: u64,
    ) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("null cache".into()))
    }
}
