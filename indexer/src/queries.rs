//! GraphQL documents sent to the chain indexer.
//!
//! Only active OpenGov delegations are ever requested: `endedAtBlock_isNull`
//! filters out retracted edges, so the indexer is the sole source of liveness.

/// Referendum statuses that count as "active" for a track.
pub const ACTIVE_PROPOSAL_STATUSES: [&str; 5] = [
    "Submitted",
    "DecisionDepositPlaced",
    "Deciding",
    "ConfirmStarted",
    "ConfirmAborted",
];

/// Edges touching `$address` on `$track_eq`, plus the active referenda count
/// of that track.
pub const TRACK_SNAPSHOT: &str = r#"
query DelegationTrackSnapshot($address: String!, $track_eq: Int!, $status_in: [ProposalStatus!]!) {
  votingDelegations(
    orderBy: createdAt_ASC
    where: {
      AND: [
        { OR: [{ from_eq: $address }, { to_eq: $address }] }
        { track_eq: $track_eq }
        { endedAtBlock_isNull: true }
        { type_eq: OpenGov }
      ]
    }
  ) {
    from
    to
    balance
    lockPeriod
    track
    createdAt
  }
  proposalsConnection(
    orderBy: id_ASC
    where: { trackNumber_eq: $track_eq, status_in: $status_in, type_eq: ReferendumV2 }
  ) {
    totalCount
  }
}
"#;

/// One page of active delegations across every track.
pub const ALL_EDGES_PAGE: &str = r#"
query AllDelegations($limit: Int!, $offset: Int!) {
  votingDelegations(
    limit: $limit
    offset: $offset
    orderBy: createdAt_ASC
    where: { endedAtBlock_isNull: true, type_eq: OpenGov }
  ) {
    from
    to
    balance
    lockPeriod
    track
    createdAt
  }
}
"#;

/// One page of active delegations on `$track_eq`.
pub const TRACK_EDGES_PAGE: &str = r#"
query TrackDelegations($track_eq: Int!, $limit: Int!, $offset: Int!) {
  votingDelegations(
    limit: $limit
    offset: $offset
    orderBy: createdAt_ASC
    where: { endedAtBlock_isNull: true, type_eq: OpenGov, track_eq: $track_eq }
  ) {
    from
    to
    balance
    lockPeriod
    track
    createdAt
  }
}
"#;
