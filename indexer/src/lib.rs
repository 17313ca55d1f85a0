//! Delegation edge source backed by a GraphQL chain indexer.
//!
//! [`EdgeSource`] is the seam the service depends on; [`IndexerClient`] is
//! the production implementation over `reqwest`.

pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod response;
pub mod source;

pub use client::IndexerClient;
pub use config::IndexerConfig;
pub use error::IndexerError;
pub use response::{decode_edges_page, decode_track_snapshot, RawDelegation};
pub use source::{EdgeSource, TrackSnapshot};
