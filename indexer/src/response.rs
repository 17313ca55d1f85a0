//! Decoding of indexer responses into [`DelegationEdge`]s.
//!
//! Records arrive as loosely typed JSON objects. Everything is optional on
//! the wire and defaulted here, so downstream code only ever sees complete
//! edges:
//! - `balance` keeps full precision whether sent as a string or a number;
//!   a missing, fractional or non-numeric one decodes as zero
//! - missing `lockPeriod` decodes as unconvicted
//! - unparsable `createdAt` is dropped
//! - missing `track` inherits the track the query was scoped to
//!
//! A record without both endpoints, or without any track at all, is skipped.

use conviction_types::{Address, Balance, DelegationEdge, LockPeriod, Timestamp, TrackId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::debug;

use crate::error::IndexerError;
use crate::source::TrackSnapshot;

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    #[serde(default)]
    message: String,
}

/// A delegation record exactly as the indexer returns it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDelegation {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// Kept as raw JSON text so integers wider than 64 bits survive.
    #[serde(default)]
    pub balance: Option<Box<RawValue>>,
    #[serde(default)]
    pub lock_period: Option<Value>,
    #[serde(default)]
    pub track: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RawDelegation {
    /// Convert to an edge, falling back to `scope_track` when the record has
    /// no track of its own.
    pub fn into_edge(self, scope_track: Option<TrackId>) -> Option<DelegationEdge> {
        let from = self.from.map(Address::new).filter(|a| !a.is_empty())?;
        let to = self.to.map(Address::new).filter(|a| !a.is_empty())?;
        let track = self
            .track
            .as_ref()
            .and_then(value_as_u64)
            .and_then(|t| TrackId::try_from(t).ok())
            .or(scope_track)?;

        let balance = self
            .balance
            .as_ref()
            .and_then(|raw| raw_as_balance(raw))
            .unwrap_or_default();
        let lock_period = self
            .lock_period
            .as_ref()
            .and_then(value_as_u64)
            .and_then(|p| u32::try_from(p).ok())
            .map(LockPeriod::new)
            .unwrap_or_default();
        let created_at = self.created_at.as_deref().and_then(Timestamp::from_rfc3339);

        Some(DelegationEdge {
            from,
            to,
            balance,
            lock_period,
            track,
            created_at,
        })
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A JSON integer of any width, or a decimal string.
fn raw_as_balance(raw: &RawValue) -> Option<Balance> {
    let text = raw.get().trim();
    if text.starts_with('"') {
        let s: String = serde_json::from_str(text).ok()?;
        return Balance::from_decimal_str(&s);
    }
    Balance::from_decimal_str(text)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgesData {
    #[serde(default)]
    voting_delegations: Vec<RawDelegation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalCount {
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackSnapshotData {
    #[serde(default)]
    voting_delegations: Vec<RawDelegation>,
    #[serde(default)]
    proposals_connection: Option<TotalCount>,
}

/// Unwrap a GraphQL envelope, turning reported errors into [`IndexerError::Graphql`].
fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, IndexerError> {
    let envelope: GraphqlResponse<T> =
        serde_json::from_slice(body).map_err(|e| IndexerError::Decode(e.to_string()))?;

    if let Some(errors) = envelope.errors.filter(|errs| !errs.is_empty()) {
        let joined = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(IndexerError::Graphql(joined));
    }

    envelope
        .data
        .ok_or_else(|| IndexerError::Decode("response has neither data nor errors".into()))
}

fn into_edges(raw: Vec<RawDelegation>, scope_track: Option<TrackId>) -> Vec<DelegationEdge> {
    let total = raw.len();
    let edges: Vec<_> = raw
        .into_iter()
        .filter_map(|r| r.into_edge(scope_track))
        .collect();
    if edges.len() < total {
        debug!(skipped = total - edges.len(), "dropped incomplete delegation records");
    }
    edges
}

/// Decode one `votingDelegations` page.
///
/// Returns the decoded edges and the number of raw records on the page, so
/// callers can tell a short page from one with skipped records.
pub fn decode_edges_page(
    body: &[u8],
    scope_track: Option<TrackId>,
) -> Result<(Vec<DelegationEdge>, usize), IndexerError> {
    let data: EdgesData = decode_envelope(body)?;
    let raw_len = data.voting_delegations.len();
    Ok((into_edges(data.voting_delegations, scope_track), raw_len))
}

/// Decode a per-track snapshot response.
pub fn decode_track_snapshot(body: &[u8], track: TrackId) -> Result<TrackSnapshot, IndexerError> {
    let data: TrackSnapshotData = decode_envelope(body)?;
    Ok(TrackSnapshot {
        edges: into_edges(data.voting_delegations, Some(track)),
        active_proposals_count: data
            .proposals_connection
            .map(|c| c.total_count)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_complete_record() {
        let body = br#"{"data":{"votingDelegations":[
            {"from":"A","to":"B","balance":"12345678901234567890123","lockPeriod":3,"track":11,"createdAt":"2024-01-02T03:04:05.000Z"}
        ]}}"#;
        let (edges, raw) = decode_edges_page(body, None).unwrap();
        assert_eq!(raw, 1);
        let edge = &edges[0];
        assert_eq!(edge.from.as_str(), "A");
        assert_eq!(edge.balance, Balance::from_decimal_str("12345678901234567890123").unwrap());
        assert_eq!(edge.lock_period, LockPeriod::new(3));
        assert_eq!(edge.track, 11);
        assert_eq!(edge.created_at, Some(Timestamp::new(1_704_164_645)));
    }

    #[test]
    fn numeric_balance_wider_than_u64_keeps_precision() {
        let body = br#"{"data":{"votingDelegations":[
            {"from":"A","to":"B","balance":100000000000000000000,"lockPeriod":1,"track":0},
            {"from":"C","to":"D","balance":42,"track":0}
        ]}}"#;
        let (edges, _) = decode_edges_page(body, None).unwrap();
        assert_eq!(
            edges[0].balance,
            Balance::from_decimal_str("100000000000000000000").unwrap()
        );
        assert_eq!(edges[1].balance, Balance::from(42u64));
    }

    #[test]
    fn non_integer_numeric_balance_is_zero() {
        let body = br#"{"data":{"votingDelegations":[
            {"from":"A","to":"B","balance":1.5,"track":0},
            {"from":"A","to":"B","balance":-7,"track":0},
            {"from":"A","to":"B","balance":1e21,"track":0},
            {"from":"A","to":"B","balance":null,"track":0}
        ]}}"#;
        let (edges, _) = decode_edges_page(body, None).unwrap();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.balance.is_zero()));
    }

    #[test]
    fn lenient_defaults() {
        let body = br#"{"data":{"votingDelegations":[
            {"from":"A","to":"B","balance":"not-a-number","createdAt":"yesterday"},
            {"from":"C","to":"D","lockPeriod":null,"track":"4"}
        ]}}"#;
        let (edges, _) = decode_edges_page(body, Some(7)).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges[0].balance.is_zero());
        assert!(edges[0].lock_period.is_unconvicted());
        assert_eq!(edges[0].track, 7);
        assert_eq!(edges[0].created_at, None);
        assert_eq!(edges[1].track, 4);
    }

    #[test]
    fn drops_records_without_endpoints_or_track() {
        let body = br#"{"data":{"votingDelegations":[
            {"from":"A","balance":"1","track":0},
            {"from":"A","to":"B","balance":"1"},
            {"from":"A","to":"B","balance":"1","track":2}
        ]}}"#;
        let (edges, raw) = decode_edges_page(body, None).unwrap();
        assert_eq!(raw, 3);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].track, 2);
    }

    #[test]
    fn graphql_errors_surface() {
        let body = br#"{"data":null,"errors":[{"message":"boom"},{"message":"bang"}]}"#;
        match decode_edges_page(body, None) {
            Err(IndexerError::Graphql(msg)) => assert_eq!(msg, "boom; bang"),
            other => panic!("expected Graphql error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(decode_edges_page(b"<html>", None), Err(IndexerError::Decode(_))));
        assert!(matches!(decode_edges_page(b"{}", None), Err(IndexerError::Decode(_))));
    }

    #[test]
    fn snapshot_carries_active_proposals() {
        let body = br#"{"data":{
            "votingDelegations":[{"from":"A","to":"B","balance":"10","lockPeriod":1}],
            "proposalsConnection":{"totalCount":5}
        }}"#;
        let snapshot = decode_track_snapshot(body, 33).unwrap();
        assert_eq!(snapshot.active_proposals_count, 5);
        assert_eq!(snapshot.edges[0].track, 33);
    }

    #[test]
    fn snapshot_without_proposals_is_zero() {
        let body = br#"{"data":{"votingDelegations":[]}}"#;
        let snapshot = decode_track_snapshot(body, 0).unwrap();
        assert_eq!(snapshot, TrackSnapshot::default());
    }
}
