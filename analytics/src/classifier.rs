//! Per-track delegation status of a single address.

use conviction_types::{Address, DelegationEdge, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How an address participates in delegation on one track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelegationStatus {
    /// No active edge touches the address.
    Undelegated,
    /// The address delegates its own votes.
    Delegated,
    /// Some other address delegates to this one.
    ReceivedDelegation,
}

/// Delegation status of one address on one track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDelegationStatus {
    pub track: TrackId,
    pub active_proposals_count: u64,
    /// `{Undelegated}` alone, or a non-empty subset of `{Delegated, ReceivedDelegation}`.
    pub status: BTreeSet<DelegationStatus>,
    pub received_delegation_count: usize,
    pub delegations: Vec<DelegationEdge>,
}

impl TrackDelegationStatus {
    pub fn with_active_proposals(mut self, count: u64) -> Self {
        self.active_proposals_count = count;
        self
    }

    pub fn is_undelegated(&self) -> bool {
        self.status.contains(&DelegationStatus::Undelegated)
    }
}

/// Classify `address` on `track` from the edges touching it.
///
/// `canonical` maps an edge endpoint to the form `address` is already in,
/// so raw and encoded spellings of one key compare equal. Scanning stops as
/// soon as both outgoing and incoming delegation have been seen.
pub fn classify<F>(
    address: &Address,
    track: TrackId,
    edges: Vec<DelegationEdge>,
    canonical: F,
) -> TrackDelegationStatus
where
    F: Fn(&Address) -> Address,
{
    let mut status = BTreeSet::new();

    if edges.is_empty() {
        status.insert(DelegationStatus::Undelegated);
        return TrackDelegationStatus {
            track,
            active_proposals_count: 0,
            status,
            received_delegation_count: 0,
            delegations: edges,
        };
    }

    let is_outgoing = |edge: &DelegationEdge| canonical(&edge.from) == *address;

    for edge in &edges {
        if is_outgoing(edge) {
            status.insert(DelegationStatus::Delegated);
        } else {
            status.insert(DelegationStatus::ReceivedDelegation);
        }
        if status.len() == 2 {
            break;
        }
    }

    let received_delegation_count = if status.contains(&DelegationStatus::ReceivedDelegation) {
        edges.iter().filter(|e| !is_outgoing(*e)).count()
    } else {
        0
    };

    TrackDelegationStatus {
        track,
        active_proposals_count: 0,
        status,
        received_delegation_count,
        delegations: edges,
    }
}
