//! OpenGov track tables.

use serde::Serialize;

/// Numeric OpenGov track identifier.
pub type TrackId = u16;

/// Static description of one governance track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub id: TrackId,
    pub name: &'static str,
}

const fn track(id: TrackId, name: &'static str) -> TrackInfo {
    TrackInfo { id, name }
}

/// Track set shared by the Polkadot, Kusama and Westend relay chains.
pub const RELAY_CHAIN_TRACKS: &[TrackInfo] = &[
    track(0, "root"),
    track(1, "whitelisted_caller"),
    track(2, "wish_for_change"),
    track(10, "staking_admin"),
    track(11, "treasurer"),
    track(12, "lease_admin"),
    track(13, "fellowship_admin"),
    track(14, "general_admin"),
    track(15, "auction_admin"),
    track(20, "referendum_canceller"),
    track(21, "referendum_killer"),
    track(30, "small_tipper"),
    track(31, "big_tipper"),
    track(32, "small_spender"),
    track(33, "medium_spender"),
    track(34, "big_spender"),
];

pub const MOONBEAM_TRACKS: &[TrackInfo] = &[
    track(0, "root"),
    track(1, "whitelisted_caller"),
    track(2, "general_admin"),
    track(3, "referendum_canceller"),
    track(4, "referendum_killer"),
    track(5, "fast_general_admin"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn track_ids_are_unique() {
        for table in [RELAY_CHAIN_TRACKS, MOONBEAM_TRACKS] {
            let ids: HashSet<_> = table.iter().map(|t| t.id).collect();
            assert_eq!(ids.len(), table.len());
        }
    }
}
