//! Timestamp type used for edge creation times and cache expiry.
//!
//! Timestamps are Unix epoch seconds (UTC).

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Current system time. A clock set before 1970 reads as the epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    /// Parse an RFC 3339 date-time such as the indexer's `createdAt`.
    /// Instants before the epoch are rejected.
    pub fn from_rfc3339(s: &str) -> Option<Self> {
        let parsed = DateTime::parse_from_rfc3339(s.trim()).ok()?;
        u64::try_from(parsed.timestamp()).ok().map(Self)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Whether `duration_secs` after this instant has been reached at `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
