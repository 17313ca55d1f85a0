//! Arbitrary-precision token amounts.
//!
//! On-chain balances are raw planck-style units that routinely exceed
//! `u128` once multiplied by conviction, so both types wrap [`BigUint`].
//! On the wire they are decimal strings.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

macro_rules! big_amount {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(BigUint);

        impl $name {
            pub fn zero() -> Self {
                Self(BigUint::zero())
            }

            pub fn new(raw: BigUint) -> Self {
                Self(raw)
            }

            /// Parse a base-10 string of raw units. `None` on anything else.
            pub fn from_decimal_str(s: &str) -> Option<Self> {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                BigUint::from_str(s).ok().map(Self)
            }

            pub fn raw(&self) -> &BigUint {
                &self.0
            }

            pub fn into_raw(self) -> BigUint {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }

        impl From<BigUint> for $name {
            fn from(raw: BigUint) -> Self {
                Self(raw)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(BigUint::from(raw))
            }
        }

        impl From<u128> for $name {
            fn from(raw: u128) -> Self {
                Self(BigUint::from(raw))
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> Add<&'a $name> for $name {
            type Output = Self;
            fn add(self, rhs: &'a $name) -> Self {
                Self(self.0 + &rhs.0)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl<'a> Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a $name>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0.to_str_radix(10))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(DecimalVisitor).map(Self)
            }
        }
    };
}

big_amount!(
    /// Raw token balance locked behind a delegation.
    Balance
);

big_amount!(
    /// Effective governance weight derived from a balance and its conviction.
    VotingPower
);

/// Accepts decimal strings and non-negative JSON integers.
struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = BigUint;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigUint, E> {
        Ok(BigUint::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<BigUint, E> {
        Ok(BigUint::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigUint, E> {
        u64::try_from(v)
            .map(BigUint::from)
            .map_err(|_| E::custom(format!("negative amount: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigUint, E> {
        Balance::from_decimal_str(v)
            .map(Balance::into_raw)
            .ok_or_else(|| E::custom(format!("invalid decimal amount: {v:?}")))
    }
}
