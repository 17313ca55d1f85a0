//! Shared domain types for conviction-weighted delegation analytics.
//!
//! This crate defines the vocabulary every other crate in the workspace
//! speaks: addresses, networks and their governance tracks, arbitrary
//! precision token amounts, delegation edges, and timestamps.

pub mod address;
pub mod amount;
pub mod edge;
pub mod error;
pub mod network;
pub mod time;
pub mod track;

pub use address::Address;
pub use amount::{Balance, VotingPower};
pub use edge::{DelegationEdge, LockPeriod};
pub use error::TypesError;
pub use network::{AddressFormat, GovType, NetworkId};
pub use time::Timestamp;
pub use track::{TrackId, TrackInfo};
