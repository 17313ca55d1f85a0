//! Network-wide track analytics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};

use conviction_analytics::{aggregate, summarize_by_track, DelegationAnalytics, TrackSummary};
use conviction_cache::CacheKey;
use conviction_types::{NetworkId, TrackId};

use crate::error::ServiceError;
use crate::service::AnalyticsService;

/// Result of a track statistics query.
///
/// Serialises as the bare analytics object or the bare per-track map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackStats {
    /// Full analytics of one track.
    Track(DelegationAnalytics),
    /// Distinct delegate/delegator counts of every track.
    Summaries(BTreeMap<TrackId, TrackSummary>),
}

impl AnalyticsService {
    /// Analytics of `track_id` on `network`, or per-track summaries when no
    /// track is given.
    ///
    /// Only malformed input is an error. An unreachable indexer, or a network
    /// without track-based governance, yields zero-valued stats.
    pub async fn get_track_delegation_analytics_stats(
        &self,
        network: &str,
        track_id: Option<&str>,
    ) -> Result<TrackStats, ServiceError> {
        let network = Self::parse_network(network)?;

        if !Self::supports_open_gov(network) {
            if let Some(raw) = track_id {
                raw.trim()
                    .parse::<TrackId>()
                    .map_err(|_| ServiceError::InvalidParams(raw.to_string()))?;
                return Ok(TrackStats::Track(DelegationAnalytics::default()));
            }
            return Ok(TrackStats::Summaries(BTreeMap::new()));
        }

        match Self::parse_track(network, track_id)? {
            Some(track) => Ok(TrackStats::Track(
                self.delegation_analytics(network, Some(track)).await,
            )),
            None => Ok(TrackStats::Summaries(self.track_summaries(network).await)),
        }
    }

    /// Aggregated analytics over `track`, or over all tracks when `None`.
    ///
    /// Served from cache within the analytics TTL. A failed fetch yields
    /// empty analytics, which are not cached.
    pub(crate) async fn delegation_analytics(
        &self,
        network: NetworkId,
        track: Option<TrackId>,
    ) -> DelegationAnalytics {
        let key = CacheKey::delegation_analytics(network, track);
        if let Some(cached) = self.cache_read::<DelegationAnalytics>(&key).await {
            return cached;
        }

        self.metrics.indexer_fetches.inc();
        let edges = match self.source.fetch_edges(network, track).await {
            Ok(edges) => self.normalize_edges(network, edges),
            Err(e) => {
                self.metrics.indexer_fetch_failures.inc();
                warn!(network = %network, ?track, error = %e, "edge fetch failed; returning empty analytics");
                return DelegationAnalytics::default();
            }
        };

        let started = Instant::now();
        let analytics = aggregate(&edges);
        self.metrics
            .aggregation_duration_ms
            .observe(started.elapsed().as_secs_f64() * 1000.0);
        info!(
            network = %network,
            ?track,
            edges = edges.len(),
            delegates = analytics.total_delegates,
            delegators = analytics.total_delegators,
            "recomputed delegation analytics"
        );

        self.cache_write(&key, &analytics, self.config.cache.analytics_ttl_secs)
            .await;
        analytics
    }

    /// Per-track distinct delegate/delegator counts of `network`.
    async fn track_summaries(&self, network: NetworkId) -> BTreeMap<TrackId, TrackSummary> {
        let tracks = network.track_ids();
        let key = CacheKey::track_summaries(network);
        if let Some(cached) = self.cache_read::<BTreeMap<TrackId, TrackSummary>>(&key).await {
            return cached;
        }

        self.metrics.indexer_fetches.inc();
        let edges = match self.source.fetch_edges(network, None).await {
            Ok(edges) => self.normalize_edges(network, edges),
            Err(e) => {
                self.metrics.indexer_fetch_failures.inc();
                warn!(network = %network, error = %e, "edge fetch failed; returning zero summaries");
                return summarize_by_track(&[], &tracks);
            }
        };

        let started = Instant::now();
        let summaries = summarize_by_track(&edges, &tracks);
        self.metrics
            .aggregation_duration_ms
            .observe(started.elapsed().as_secs_f64() * 1000.0);
        info!(network = %network, edges = edges.len(), "recomputed track summaries");

        self.cache_write(&key, &summaries, self.config.cache.analytics_ttl_secs)
            .await;
        summaries
    }
}
