//! Typed cache keys.
//!
//! A key enumerates every field that scopes a cached value. The string form
//! tags each field by name and always emits all of them, absent ones as `-`,
//! so two keys render equal only if every field is equal.

use conviction_types::{Address, GovType, NetworkId, TrackId};
use std::fmt;

/// Version tag leading every rendered key; bump when a cached payload changes shape.
const KEY_VERSION: &str = "v1";

/// What kind of value a key points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKeyKind {
    /// `DelegationAnalytics` for one track, or for all tracks.
    DelegationAnalytics,
    /// Per-track delegate/delegator counts for a whole network.
    TrackSummaries,
    /// One address's per-track dashboard.
    Dashboard,
}

impl CacheKeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DelegationAnalytics => "delegation_analytics",
            Self::TrackSummaries => "track_summaries",
            Self::Dashboard => "dashboard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub network: NetworkId,
    pub gov_type: GovType,
    pub kind: CacheKeyKind,
    pub track: Option<TrackId>,
    pub address: Option<Address>,
}

impl CacheKey {
    /// Analytics for `track`, or across every track when `None`.
    pub fn delegation_analytics(network: NetworkId, track: Option<TrackId>) -> Self {
        Self {
            network,
            gov_type: GovType::OpenGov,
            kind: CacheKeyKind::DelegationAnalytics,
            track,
            address: None,
        }
    }

    pub fn track_summaries(network: NetworkId) -> Self {
        Self {
            network,
            gov_type: GovType::OpenGov,
            kind: CacheKeyKind::TrackSummaries,
            track: None,
            address: None,
        }
    }

    /// Dashboard of `address`, restricted to `track` when given.
    pub fn dashboard(network: NetworkId, address: &Address, track: Option<TrackId>) -> Self {
        Self {
            network,
            gov_type: GovType::OpenGov,
            kind: CacheKeyKind::Dashboard,
            track,
            address: Some(address.clone()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conviction:{KEY_VERSION}|network:{}|gov:{}|kind:{}|track:",
            self.network.as_str(),
            self.gov_type.as_str(),
            self.kind.as_str(),
        )?;
        match self.track {
            Some(t) => write!(f, "{t}")?,
            None => f.write_str("all")?,
        }
        f.write_str("|address:")?;
        match &self.address {
            Some(a) => f.write_str(a.as_str()),
            None => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn renders_every_field() {
        let key = CacheKey::delegation_analytics(NetworkId::Kusama, Some(11));
        assert_eq!(
            key.to_string(),
            "conviction:v1|network:kusama|gov:open_gov|kind:delegation_analytics|track:11|address:-"
        );
        let all = CacheKey::delegation_analytics(NetworkId::Kusama, None);
        assert!(all.to_string().contains("|track:all|"));
    }

    #[test]
    fn distinct_scopes_never_collide() {
        let addr = Address::new("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");
        let mut keys = vec![
            CacheKey::track_summaries(NetworkId::Polkadot),
            CacheKey::track_summaries(NetworkId::Kusama),
            CacheKey::delegation_analytics(NetworkId::Polkadot, None),
            CacheKey::dashboard(NetworkId::Polkadot, &addr, None),
            CacheKey::dashboard(NetworkId::Polkadot, &addr, Some(0)),
            CacheKey::dashboard(NetworkId::Kusama, &addr, None),
        ];
        for track in [0u16, 1, 10, 11] {
            keys.push(CacheKey::delegation_analytics(NetworkId::Polkadot, Some(track)));
        }
        let mut gov1 = CacheKey::track_summaries(NetworkId::Polkadot);
        gov1.gov_type = GovType::Gov1;
        keys.push(gov1);

        let rendered: HashSet<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), keys.len());
    }
}
