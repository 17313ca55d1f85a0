//! Per-address delegation dashboard.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use conviction_analytics::{classify, TrackDelegationStatus};
use conviction_cache::CacheKey;
use conviction_indexer::IndexerError;
use conviction_types::{Address, NetworkId, TrackId};

use crate::error::ServiceError;
use crate::fanout::settle_all;
use crate::service::AnalyticsService;

/// Delegation status of one address across a network's tracks.
///
/// A track whose fetch failed appears in `failed_tracks` and nowhere in
/// `tracks`; an empty `tracks` with empty `failed_tracks` genuinely means
/// nothing was asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub tracks: Vec<TrackDelegationStatus>,
    pub failed_tracks: Vec<TrackId>,
}

impl DashboardData {
    pub fn is_complete(&self) -> bool {
        self.failed_tracks.is_empty()
    }

    pub fn track(&self, track: TrackId) -> Option<&TrackDelegationStatus> {
        self.tracks.iter().find(|t| t.track == track)
    }
}

impl AnalyticsService {
    /// Delegation status of `address` on every track of `network`, or only
    /// on `track_num` when given.
    ///
    /// Validation happens before any I/O. An empty address, or a network
    /// without track-based governance, yields an empty dashboard. Tracks
    /// whose fetch fails are left out and listed in
    /// [`DashboardData::failed_tracks`].
    pub async fn get_delegation_dashboard_data(
        &self,
        address: &str,
        network: &str,
        track_num: Option<&str>,
    ) -> Result<DashboardData, ServiceError> {
        let network = Self::parse_network(network)?;
        let address = address.trim();
        if address.is_empty() || !Self::supports_open_gov(network) {
            return Ok(DashboardData::default());
        }
        let encoded = self
            .encoder
            .encode(address, network)
            .ok_or_else(|| ServiceError::InvalidAddress(address.to_string()))?;
        let track = Self::parse_track(network, track_num)?;

        let key = CacheKey::dashboard(network, &encoded, track);
        if let Some(cached) = self.cache_read::<DashboardData>(&key).await {
            return Ok(cached);
        }

        let tracks = match track {
            Some(t) => vec![t],
            None => network.track_ids(),
        };
        let outcomes = settle_all(tracks, self.config.max_concurrent_fetches, |t| {
            self.track_status(network, &encoded, t)
        })
        .await;

        let mut dashboard = DashboardData::default();
        for (track, outcome) in outcomes {
            match outcome {
                Ok(status) => dashboard.tracks.push(status),
                Err(e) => {
                    warn!(network = %network, track, error = %e, "track fetch failed; omitting track");
                    dashboard.failed_tracks.push(track);
                }
            }
        }

        if dashboard.is_complete() {
            self.cache_write(&key, &dashboard, self.config.cache.dashboard_ttl_secs)
                .await;
        } else {
            info!(
                network = %network,
                failed = dashboard.failed_tracks.len(),
                succeeded = dashboard.tracks.len(),
                "partial dashboard not cached"
            );
        }
        Ok(dashboard)
    }

    /// Fetch and classify one track. Errors stay inside this branch.
    async fn track_status(
        &self,
        network: NetworkId,
        address: &Address,
        track: TrackId,
    ) -> Result<TrackDelegationStatus, IndexerError> {
        self.metrics.indexer_fetches.inc();
        let snapshot = self
            .source
            .fetch_track_snapshot(network, address, track)
            .await
            .inspect_err(|_| self.metrics.indexer_fetch_failures.inc())?;

        let mut status = classify(address, track, snapshot.edges, |a| self.canonical(network, a))
            .with_active_proposals(snapshot.active_proposals_count);
        status.delegations = self.normalize_edges(network, status.delegations);
        Ok(status)
    }
}
