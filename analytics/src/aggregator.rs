//! Network-wide delegation aggregation.
//!
//! [`aggregate`] is a fold over the edge list: each step takes the
//! accumulator by value and hands back the updated one. Totals and map
//! contents do not depend on edge order; only the order of records inside
//! one key's `data` list does.

use conviction_types::{Address, Balance, DelegationEdge, TrackId, VotingPower};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::voting_power::{compute_voting_power, ConvictionMultiplier};

/// One delegation as seen from an aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationRecord {
    pub capital: Balance,
    pub from: Address,
    pub to: Address,
    pub locked_period: ConvictionMultiplier,
    pub voting_power: VotingPower,
}

/// Every delegation sharing one delegatee (or one delegator).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateAggregate {
    pub count: usize,
    pub data: Vec<DelegationRecord>,
}

impl DelegateAggregate {
    fn with_record(mut self, record: DelegationRecord) -> Self {
        self.count += 1;
        self.data.push(record);
        self
    }

    pub fn total_capital(&self) -> Balance {
        self.data.iter().map(|r| &r.capital).sum()
    }

    pub fn total_voting_power(&self) -> VotingPower {
        self.data.iter().map(|r| &r.voting_power).sum()
    }
}

/// Aggregated delegation graph for one network scope (a track or all tracks).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationAnalytics {
    /// Keyed by `to`.
    pub delegatees_data: BTreeMap<Address, DelegateAggregate>,
    /// Keyed by `from`.
    pub delegators_data: BTreeMap<Address, DelegateAggregate>,
    pub total_capital: Balance,
    pub total_votes_balance: VotingPower,
    pub total_delegates: usize,
    pub total_delegators: usize,
}

impl DelegationAnalytics {
    /// Fold one edge into the accumulator.
    pub fn with_edge(mut self, edge: &DelegationEdge) -> Self {
        let voting_power = compute_voting_power(&edge.balance, edge.lock_period);
        let record = DelegationRecord {
            capital: edge.balance.clone(),
            from: edge.from.clone(),
            to: edge.to.clone(),
            locked_period: edge.lock_period.into(),
            voting_power: voting_power.clone(),
        };

        let delegatee = self.delegatees_data.remove(&edge.to).unwrap_or_default();
        self.delegatees_data
            .insert(edge.to.clone(), delegatee.with_record(record.clone()));
        let delegator = self.delegators_data.remove(&edge.from).unwrap_or_default();
        self.delegators_data
            .insert(edge.from.clone(), delegator.with_record(record));

        self.total_capital = self.total_capital + &edge.balance;
        self.total_votes_balance = self.total_votes_balance + voting_power;
        self.total_delegates = self.delegatees_data.len();
        self.total_delegators = self.delegators_data.len();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.delegatees_data.is_empty() && self.delegators_data.is_empty()
    }
}

/// Build delegatee- and delegator-keyed aggregates over `edges`.
pub fn aggregate<'a, I>(edges: I) -> DelegationAnalytics
where
    I: IntoIterator<Item = &'a DelegationEdge>,
{
    edges
        .into_iter()
        .fold(DelegationAnalytics::default(), DelegationAnalytics::with_edge)
}

/// Distinct delegate/delegator counts for one track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub total_delegates: usize,
    pub total_delegators: usize,
}

/// Per-track distinct delegate/delegator counts.
///
/// Every id in `tracks` appears in the result, zeroed when it has no edges.
/// Edges on tracks outside `tracks` are ignored.
pub fn summarize_by_track(
    edges: &[DelegationEdge],
    tracks: &[TrackId],
) -> BTreeMap<TrackId, TrackSummary> {
    let mut seen: BTreeMap<TrackId, (BTreeSet<&Address>, BTreeSet<&Address>)> = tracks
        .iter()
        .map(|&t| (t, (BTreeSet::new(), BTreeSet::new())))
        .collect();

    for edge in edges {
        if let Some((delegates, delegators)) = seen.get_mut(&edge.track) {
            delegates.insert(&edge.to);
            delegators.insert(&edge.from);
        }
    }

    seen.into_iter()
        .map(|(track, (delegates, delegators))| {
            (
                track,
                TrackSummary {
                    total_delegates: delegates.len(),
                    total_delegators: delegators.len(),
                },
            )
        })
        .collect()
}
