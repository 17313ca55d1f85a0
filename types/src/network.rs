//! Network identifiers and their governance capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::track::{TrackId, TrackInfo, MOONBEAM_TRACKS, RELAY_CHAIN_TRACKS};

/// How account addresses are rendered on a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// Substrate SS58 with the given address-type prefix.
    Ss58(u16),
    /// Ethereum-style 20-byte hex account.
    H160,
}

/// Governance model a query is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovType {
    /// Track-based referenda with per-track delegation (OpenGov).
    OpenGov,
    /// Legacy council/democracy governance.
    Gov1,
}

impl GovType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenGov => "open_gov",
            Self::Gov1 => "gov1",
        }
    }
}

/// Identifies which chain an analytics query is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Polkadot,
    Kusama,
    Westend,
    Moonbeam,
    Acala,
}

impl NetworkId {
    /// Every network this build knows about.
    pub const ALL: [NetworkId; 5] = [
        Self::Polkadot,
        Self::Kusama,
        Self::Westend,
        Self::Moonbeam,
        Self::Acala,
    ];

    /// Human-readable name, also the wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polkadot => "polkadot",
            Self::Kusama => "kusama",
            Self::Westend => "westend",
            Self::Moonbeam => "moonbeam",
            Self::Acala => "acala",
        }
    }

    pub fn address_format(&self) -> AddressFormat {
        match self {
            Self::Polkadot => AddressFormat::Ss58(0),
            Self::Kusama => AddressFormat::Ss58(2),
            Self::Westend => AddressFormat::Ss58(42),
            Self::Moonbeam => AddressFormat::H160,
            Self::Acala => AddressFormat::Ss58(10),
        }
    }

    /// Whether the network runs the given governance model.
    pub fn supports(&self, gov_type: GovType) -> bool {
        match gov_type {
            GovType::OpenGov => !self.tracks().is_empty(),
            GovType::Gov1 => true,
        }
    }

    /// OpenGov tracks of this network, empty when OpenGov is not deployed.
    pub fn tracks(&self) -> &'static [TrackInfo] {
        match self {
            Self::Polkadot | Self::Kusama | Self::Westend => RELAY_CHAIN_TRACKS,
            Self::Moonbeam => MOONBEAM_TRACKS,
            Self::Acala => &[],
        }
    }

    pub fn track(&self, id: TrackId) -> Option<&'static TrackInfo> {
        self.tracks().iter().find(|t| t.id == id)
    }

    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks().iter().map(|t| t.id).collect()
    }

    /// Parse a user-supplied track number and check it exists here.
    pub fn parse_track(&self, raw: &str) -> Result<TrackId, TypesError> {
        let id: TrackId = raw
            .trim()
            .parse()
            .map_err(|_| TypesError::InvalidTrackNumber(raw.to_string()))?;
        self.track(id)
            .map(|t| t.id)
            .ok_or_else(|| TypesError::UnknownTrack {
                network: self.as_str().to_string(),
                track: id,
            })
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == wanted)
            .ok_or_else(|| TypesError::UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Polkadot".parse::<NetworkId>().unwrap(), NetworkId::Polkadot);
        assert_eq!(" kusama ".parse::<NetworkId>().unwrap(), NetworkId::Kusama);
    }

    #[test]
    fn unknown_network_rejected() {
        let err = "dogechain".parse::<NetworkId>().unwrap_err();
        assert!(matches!(err, TypesError::UnknownNetwork(ref n) if n == "dogechain"));
    }

    #[test]
    fn every_network_round_trips_through_its_name() {
        for network in NetworkId::ALL {
            assert_eq!(network.as_str().parse::<NetworkId>().unwrap(), network);
        }
    }

    #[test]
    fn acala_has_no_open_gov() {
        assert!(!NetworkId::Acala.supports(GovType::OpenGov));
        assert!(NetworkId::Acala.supports(GovType::Gov1));
        assert!(NetworkId::Polkadot.supports(GovType::OpenGov));
    }

    #[test]
    fn track_lookup() {
        assert_eq!(NetworkId::Polkadot.track(0).map(|t| t.name), Some("root"));
        assert!(NetworkId::Polkadot.track(99).is_none());
        assert_eq!(NetworkId::Moonbeam.track(5).map(|t| t.name), Some("fast_general_admin"));
    }

    #[test]
    fn parse_track_validates_number_and_membership() {
        assert_eq!(NetworkId::Kusama.parse_track(" 33 ").unwrap(), 33);
        assert!(matches!(
            NetworkId::Kusama.parse_track("abc"),
            Err(TypesError::InvalidTrackNumber(_))
        ));
        assert!(matches!(
            NetworkId::Moonbeam.parse_track("33"),
            Err(TypesError::UnknownTrack { track: 33, .. })
        ));
        assert!(NetworkId::Polkadot.parse_track("-1").is_err());
    }
}
