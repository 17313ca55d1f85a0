//! Delegation edges as observed on chain.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::amount::Balance;
use crate::time::Timestamp;
use crate::track::TrackId;

/// Conviction lock multiplier chosen by the delegator.
///
/// `0` means unconvicted ("0.1x"); the indexer omits the field in that case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockPeriod(u32);

impl LockPeriod {
    pub const UNCONVICTED: Self = Self(0);

    pub fn new(periods: u32) -> Self {
        Self(periods)
    }

    pub fn periods(&self) -> u32 {
        self.0
    }

    pub fn is_unconvicted(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LockPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconvicted() {
            f.write_str("0.1x")
        } else {
            write!(f, "{}x", self.0)
        }
    }
}

/// `from` delegated `balance` at conviction `lock_period` to `to` on
/// `track`, and the delegation is still active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationEdge {
    pub from: Address,
    pub to: Address,
    pub balance: Balance,
    #[serde(default)]
    pub lock_period: LockPeriod,
    pub track: TrackId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl DelegationEdge {
    /// Whether `address` is either end of this edge (plain string equality).
    pub fn touches(&self, address: &Address) -> bool {
        &self.from == address || &self.to == address
    }
}
