//! Conviction voting power.
//!
//! Analytics uses a linear model of conviction: a lock of `n` periods
//! multiplies the balance by `n`, and an unconvicted delegation counts for
//! a tenth of its balance (integer division, remainder truncated).

use conviction_types::{Balance, LockPeriod, VotingPower};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Divisor applied to unconvicted balances ("0.1x").
const UNCONVICTED_DIVISOR: u32 = 10;

/// Effective voting power of `balance` locked for `lock_period`.
pub fn compute_voting_power(balance: &Balance, lock_period: LockPeriod) -> VotingPower {
    if lock_period.is_unconvicted() {
        VotingPower::new(balance.raw() / UNCONVICTED_DIVISOR)
    } else {
        VotingPower::new(balance.raw() * lock_period.periods())
    }
}

/// The multiplier shown next to an aggregated delegation.
///
/// Serialises as `0.1` when unconvicted and as the integer lock period
/// otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConvictionMultiplier {
    Unconvicted,
    Locked(u32),
}

impl From<LockPeriod> for ConvictionMultiplier {
    fn from(lock: LockPeriod) -> Self {
        if lock.is_unconvicted() {
            Self::Unconvicted
        } else {
            Self::Locked(lock.periods())
        }
    }
}

impl fmt::Display for ConvictionMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconvicted => f.write_str("0.1"),
            Self::Locked(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ConvictionMultiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unconvicted => serializer.serialize_f64(0.1),
            Self::Locked(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for ConvictionMultiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MultiplierVisitor)
    }
}

struct MultiplierVisitor;

impl<'de> Visitor<'de> for MultiplierVisitor {
    type Value = ConvictionMultiplier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0.1 or a non-negative integer lock period")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let periods = u32::try_from(v).map_err(|_| E::custom(format!("lock period too large: {v}")))?;
        Ok(LockPeriod::new(periods).into())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        let v = u64::try_from(v).map_err(|_| E::custom(format!("negative lock period: {v}")))?;
        self.visit_u64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if (v - 0.1).abs() < f64::EPSILON {
            Ok(ConvictionMultiplier::Unconvicted)
        } else if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
            Ok(LockPeriod::new(v as u32).into())
        } else {
            Err(E::custom(format!("invalid conviction multiplier: {v}")))
        }
    }
}
