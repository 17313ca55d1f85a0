//! The analytics service and its shared plumbing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use conviction_cache::{CacheKey, KvCache, MemoryCache};
use conviction_crypto::{AddressEncoder, NetworkAddressEncoder};
use conviction_indexer::{EdgeSource, IndexerClient};
use conviction_types::{Address, DelegationEdge, GovType, NetworkId, TrackId};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::metrics::AnalyticsMetrics;

/// Answers delegation queries by combining an [`EdgeSource`], a best-effort
/// [`KvCache`] and an [`AddressEncoder`].
///
/// Holds no per-request state; one instance is shared by every request.
pub struct AnalyticsService {
    pub(crate) source: Arc<dyn EdgeSource>,
    pub(crate) cache: Arc<dyn KvCache>,
    pub(crate) encoder: Arc<dyn AddressEncoder>,
    pub(crate) config: ServiceConfig,
    pub(crate) metrics: Arc<AnalyticsMetrics>,
}

impl AnalyticsService {
    pub fn new(
        source: Arc<dyn EdgeSource>,
        cache: Arc<dyn KvCache>,
        encoder: Arc<dyn AddressEncoder>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            source,
            cache,
            encoder,
            config,
            metrics: Arc::new(AnalyticsMetrics::new()),
        }
    }

    /// Production wiring: the configured indexer, an in-memory cache and
    /// per-network address encoding.
    pub fn from_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = IndexerClient::new(config.indexer.clone())
            .map_err(|e| ServiceError::Config(e.to_string()))?;
        let cache = Arc::new(MemoryCache::new(config.cache.max_entries));
        Ok(Self::new(
            Arc::new(client),
            cache,
            Arc::new(NetworkAddressEncoder),
            config,
        ))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<AnalyticsMetrics> {
        &self.metrics
    }

    // ── Validation ──────────────────────────────────────────────────────

    pub(crate) fn parse_network(raw: &str) -> Result<NetworkId, ServiceError> {
        Ok(raw.parse::<NetworkId>()?)
    }

    /// Parse an optional track number against `network`'s track table.
    pub(crate) fn parse_track(
        network: NetworkId,
        raw: Option<&str>,
    ) -> Result<Option<TrackId>, ServiceError> {
        raw.map(|t| network.parse_track(t))
            .transpose()
            .map_err(ServiceError::from)
    }

    /// Whether `network` runs track-based governance at all.
    pub(crate) fn supports_open_gov(network: NetworkId) -> bool {
        network.supports(GovType::OpenGov)
    }

    // ── Address normalisation ───────────────────────────────────────────

    /// `address` in `network`'s canonical form, or unchanged if it cannot be encoded.
    pub(crate) fn canonical(&self, network: NetworkId, address: &Address) -> Address {
        self.encoder
            .encode(address.as_str(), network)
            .unwrap_or_else(|| address.clone())
    }

    pub(crate) fn normalize_edges(
        &self,
        network: NetworkId,
        edges: Vec<DelegationEdge>,
    ) -> Vec<DelegationEdge> {
        edges
            .into_iter()
            .map(|mut edge| {
                edge.from = self.canonical(network, &edge.from);
                edge.to = self.canonical(network, &edge.to);
                edge
            })
            .collect()
    }

    // ── Best-effort cache ───────────────────────────────────────────────

    /// Cached value under `key`. Any cache failure, including an undecodable
    /// payload, reads as a miss.
    pub(crate) async fn cache_read<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    self.metrics.cache_hits.inc();
                    debug!(key = %key, "cache hit");
                    Some(value)
                }
                Err(e) => {
                    self.metrics.cache_errors.inc();
                    warn!(key = %key, error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                self.metrics.cache_misses.inc();
                debug!(key = %key, "cache miss");
                None
            }
            Err(e) => {
                self.metrics.cache_errors.inc();
                warn!(key = %key, error = %e, "cache read failed; computing directly");
                None
            }
        }
    }

    /// Store `value` under `key`, logging and dropping any failure.
    pub(crate) async fn cache_write<T: Serialize>(&self, key: &CacheKey, value: &T, ttl_secs: u64) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.metrics.cache_errors.inc();
                warn!(key = %key, error = %e, "could not serialise value for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set_with_ttl(key, raw, ttl_secs).await {
            self.metrics.cache_errors.inc();
            warn!(key = %key, error = %e, "cache write failed");
        }
    }
}
