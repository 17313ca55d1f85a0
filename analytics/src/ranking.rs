//! Delegate and delegator leaderboards.

use conviction_types::{Address, Balance, VotingPower};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::aggregator::DelegationAnalytics;

/// Which side of the delegation graph to rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingRole {
    /// Addresses receiving delegations.
    #[default]
    Delegates,
    /// Addresses granting delegations.
    Delegators,
}

impl RankingRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delegates => "delegates",
            Self::Delegators => "delegators",
        }
    }
}

impl fmt::Display for RankingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delegates" | "delegatees" => Ok(Self::Delegates),
            "delegators" => Ok(Self::Delegators),
            other => Err(format!("unknown ranking role: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateRanking {
    /// 1-based position.
    pub rank: usize,
    pub address: Address,
    pub count: usize,
    pub total_capital: Balance,
    pub total_voting_power: VotingPower,
}

/// Top `limit` addresses of `role`, by voting power, then capital, then address.
pub fn rank(analytics: &DelegationAnalytics, role: RankingRole, limit: usize) -> Vec<DelegateRanking> {
    let source = match role {
        RankingRole::Delegates => &analytics.delegatees_data,
        RankingRole::Delegators => &analytics.delegators_data,
    };

    let mut rows: Vec<_> = source
        .iter()
        .map(|(address, agg)| {
            (
                address,
                agg.count,
                agg.total_capital(),
                agg.total_voting_power(),
            )
        })
        .collect();

    rows.sort_by(|a, b| {
        (Reverse(&a.3), Reverse(&a.2), a.0).cmp(&(Reverse(&b.3), Reverse(&b.2), b.0))
    });

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (address, count, total_capital, total_voting_power))| DelegateRanking {
            rank: i + 1,
            address: address.clone(),
            count,
            total_capital,
            total_voting_power,
        })
        .collect()
}
