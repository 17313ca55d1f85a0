//! Best-effort TTL cache fronting delegation analytics.
//!
//! The service depends only on [`KvCache`]; [`MemoryCache`] is the built-in
//! backend. Keys are built through [`CacheKey`] so that distinct scopes can
//! never produce the same string.

pub mod clock;
pub mod error;
pub mod key;
pub mod memory;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::CacheError;
pub use key::{CacheKey, CacheKeyKind};
pub use memory::MemoryCache;
pub use store::KvCache;
