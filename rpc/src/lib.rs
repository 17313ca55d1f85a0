//! HTTP server for the delegation analytics service.
//!
//! Provides endpoints for:
//! - Per-address delegation dashboards
//! - Track-level delegation statistics
//! - Delegate and delegator rankings
//! - Prometheus metrics and liveness

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::RpcServer;
