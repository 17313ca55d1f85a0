//! Delegate and delegator leaderboards.

use serde::{Deserialize, Serialize};

use conviction_analytics::{rank, DelegateRanking, RankingRole};
use conviction_types::{NetworkId, TrackId};

use crate::error::ServiceError;
use crate::service::AnalyticsService;

pub const DEFAULT_RANKING_LIMIT: usize = 50;
pub const MAX_RANKING_LIMIT: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub network: NetworkId,
    /// `None` when ranked across every track.
    pub track: Option<TrackId>,
    pub role: RankingRole,
    /// Number of addresses holding `role`, before the limit is applied.
    pub total: usize,
    pub rankings: Vec<DelegateRanking>,
}

impl AnalyticsService {
    /// Top delegates (or delegators) of `network` by aggregated voting power.
    ///
    /// `role` defaults to delegates and `limit` to 50; `limit` is clamped
    /// to `1..=1000`.
    pub async fn get_delegation_rankings(
        &self,
        network: &str,
        track: Option<&str>,
        role: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Rankings, ServiceError> {
        let network = Self::parse_network(network)?;
        let role = role
            .map(str::parse::<RankingRole>)
            .transpose()
            .map_err(ServiceError::InvalidParams)?
            .unwrap_or_default();
        let limit = parse_limit(limit)?;
        if !Self::supports_open_gov(network) {
            return Ok(Rankings {
                network,
                track: None,
                role,
                total: 0,
                rankings: Vec::new(),
            });
        }
        let track = Self::parse_track(network, track)?;

        let analytics = self.delegation_analytics(network, track).await;
        let total = match role {
            RankingRole::Delegates => analytics.total_delegates,
            RankingRole::Delegators => analytics.total_delegators,
        };
        Ok(Rankings {
            network,
            track,
            role,
            total,
            rankings: rank(&analytics, role, limit),
        })
    }
}

fn parse_limit(raw: Option<&str>) -> Result<usize, ServiceError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_RANKING_LIMIT);
    };
    let limit: usize = raw
        .trim()
        .parse()
        .map_err(|_| ServiceError::InvalidParams(format!("limit: {raw}")))?;
    Ok(limit.clamp(1, MAX_RANKING_LIMIT))
}
