//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the analytics service (clock, chain indexer,
//! cache) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return scripted values
//! - Can be made to fail on demand
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod cache;
pub mod clock;
pub mod edge_source;

pub use cache::NullCache;
pub use clock::NullClock;
pub use edge_source::NullEdgeSource;
