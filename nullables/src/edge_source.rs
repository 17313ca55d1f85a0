//! Nullable edge source: a scripted chain indexer.

use async_trait::async_trait;
use conviction_indexer::{EdgeSource, IndexerError, TrackSnapshot};
use conviction_types::{Address, DelegationEdge, NetworkId, TrackId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// An [`EdgeSource`] serving a fixed edge set.
///
/// Built up front with the builder methods, then shared read-only; only the
/// call counters change afterwards.
#[derive(Default)]
pub struct NullEdgeSource {
    edges: Vec<DelegationEdge>,
    active_proposals: BTreeMap<TrackId, u64>,
    failing_tracks: BTreeSet<TrackId>,
    fail_bulk: bool,
    unfiltered_snapshots: bool,
    snapshot_calls: AtomicUsize,
    edges_calls: AtomicUsize,
}

impl NullEdgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edges(mut self, edges: impl IntoIterator<Item = DelegationEdge>) -> Self {
        self.edges.extend(edges);
        self
    }

    pub fn with_active_proposals(mut self, track: TrackId, count: u64) -> Self {
        self.active_proposals.insert(track, count);
        self
    }

    /// Every fetch scoped to `track` fails.
    pub fn failing_track(mut self, track: TrackId) -> Self {
        self.failing_tracks.insert(track);
        self
    }

    /// Snapshots return every edge on the track, whatever address form its
    /// endpoints use, instead of only string matches for the queried address.
    pub fn unfiltered_snapshots(mut self) -> Self {
        self.unfiltered_snapshots = true;
        self
    }

    /// Every [`EdgeSource::fetch_edges`] call fails.
    pub fn failing_bulk(mut self) -> Self {
        self.fail_bulk = true;
        self
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn edges_calls(&self) -> usize {
        self.edges_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> IndexerError {
        IndexerError::Status {
            status: 503,
            url: "null://indexer".into(),
        }
    }
}

#[async_trait]
impl EdgeSource for NullEdgeSource {
    async fn fetch_track_snapshot(
        &self,
        _network: NetworkId,
        address: &Address,
        track: TrackId,
    ) -> Result<TrackSnapshot, IndexerError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_tracks.contains(&track) {
            return Err(Self::unavailable());
        }
        Ok(TrackSnapshot {
            edges: self
                .edges
                .iter()
                .filter(|e| e.track == track && (self.unfiltered_snapshots || e.touches(address)))
                .cloned()
                .collect(),
            active_proposals_count: self.active_proposals.get(&track).copied().unwrap_or_default(),
        })
    }

    async fn fetch_edges(
        &self,
        _network: NetworkId,
        track: Option<TrackId>,
    ) -> Result<Vec<DelegationEdge>, IndexerError> {
        self.edges_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bulk || track.is_some_and(|t| self.failing_tracks.contains(&t)) {
            return Err(Self::unavailable());
        }
        Ok(self
            .edges
            .iter()
            .filter(|e| track.map_or(true, |t| e.track == t))
            .cloned()
            .collect())
    }
}
