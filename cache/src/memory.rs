//! In-process TTL cache.

use async_trait::async_trait;
use conviction_types::Timestamp;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::store::KvCache;

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    stored_at: Timestamp,
    ttl_secs: u64,
}

impl Entry {
    fn is_live(&self, now: Timestamp) -> bool {
        !self.stored_at.has_expired(self.ttl_secs, now)
    }

    fn expires_at(&self) -> Timestamp {
        self.stored_at.saturating_add_secs(self.ttl_secs)
    }
}

/// A bounded in-memory [`KvCache`].
///
/// Expired entries are dropped lazily on read and swept when the cache is
/// full. If a full cache holds no expired entries, the entry closest to
/// expiry is evicted to make room.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            clock,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_room(entries: &mut HashMap<String, Entry>, max_entries: usize, now: Timestamp) {
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        if entries.len() < before {
            debug!(swept = before - entries.len(), "swept expired cache entries");
        }
        while entries.len() >= max_entries {
            let Some(victim) = entries
                .iter()
                .min_by_key(|(_, e)| e.expires_at())
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            debug!(key = %victim, "evicting cache entry");
            entries.remove(&victim);
        }
    }
}

fn poisoned() -> CacheError {
    CacheError::Backend("cache lock poisoned".into())
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let rendered = key.to_string();
        let now = self.clock.now();

        {
            let entries = self.entries.read().map_err(|_| poisoned())?;
            match entries.get(&rendered) {
                None => return Ok(None),
                Some(e) if e.is_live(now) => return Ok(Some(e.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if entries.get(&rendered).is_some_and(|e| !e.is_live(now)) {
            entries.remove(&rendered);
        }
        Ok(None)
    }

    async fn set_with_ttl(
        &self,
        key: &CacheKey,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        if ttl_secs == 0 || self.max_entries == 0 {
            return Ok(());
        }
        let rendered = key.to_string();
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        if !entries.contains_key(&rendered) && entries.len() >= self.max_entries {
            Self::make_room(&mut entries, self.max_entries, now);
        }
        entries.insert(
            rendered,
            Entry {
                value,
                stored_at: now,
                ttl_secs,
            },
        );
        Ok(())
    }
}
