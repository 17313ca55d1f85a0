//! Conviction-weighted delegation analytics.
//!
//! Turns raw "delegate my vote" edges into:
//! - a per-address, per-track [`TrackDelegationStatus`] ([`classifier`])
//! - network-wide [`DelegationAnalytics`] keyed by delegatee and delegator ([`aggregator`])
//! - delegate/delegator leaderboards by aggregated voting power ([`ranking`])
//!
//! Everything here is pure: no I/O, no shared state, total over its inputs.

pub mod aggregator;
pub mod classifier;
pub mod ranking;
pub mod voting_power;

pub use aggregator::{
    aggregate, summarize_by_track, DelegateAggregate, DelegationAnalytics, DelegationRecord,
    TrackSummary,
};
pub use classifier::{classify, DelegationStatus, TrackDelegationStatus};
pub use ranking::{rank, DelegateRanking, RankingRole};
pub use voting_power::{compute_voting_power, ConvictionMultiplier};
