//! Errors raised while constructing domain types from untrusted input.

use thiserror::Error;

use crate::track::TrackId;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("track {track} does not exist on {network}")]
    UnknownTrack { network: String, track: TrackId },

    #[error("invalid track number: {0}")]
    InvalidTrackNumber(String),
}
