use async_trait::async_trait;
use conviction_types::{Address, DelegationEdge, NetworkId, TrackId};

use crate::error::IndexerError;

/// Everything the dashboard needs about one `(address, track)` pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackSnapshot {
    /// Active edges on the track with the address at either end.
    pub edges: Vec<DelegationEdge>,
    pub active_proposals_count: u64,
}

/// Where delegation edges come from.
///
/// Implementations are an unreliable remote dependency: every call may fail
/// independently, and callers are expected to contain those failures.
#[async_trait]
pub trait EdgeSource: Send + Sync {
    /// Edges touching `address` on `track`, with the track's active referenda count.
    async fn fetch_track_snapshot(
        &self,
        network: NetworkId,
        address: &Address,
        track: TrackId,
    ) -> Result<TrackSnapshot, IndexerError>;

    /// Every active edge on `track`, or on all tracks when `None`.
    async fn fetch_edges(
        &self,
        network: NetworkId,
        track: Option<TrackId>,
    ) -> Result<Vec<DelegationEdge>, IndexerError>;
}
