use async_trait::async_trait;

use crate::error::CacheError;
use crate::key::CacheKey;

/// A string key-value store with per-entry time-to-live.
///
/// Writes are blind overwrites; there is no read-modify-write, so concurrent
/// writers of one key simply race to leave a fresh value behind.
#[async_trait]
pub trait KvCache: Send + Sync {
    /// The live value under `key`, `None` when absent or expired.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    async fn set_with_ttl(
        &self,
        key: &CacheKey,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), CacheError>;
}
