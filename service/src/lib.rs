//! Delegation analytics service.
//!
//! [`AnalyticsService`] exposes the three outbound operations:
//! - [`AnalyticsService::get_delegation_dashboard_data`]: one address's
//!   per-track status, fetched concurrently with per-track failure isolation
//! - [`AnalyticsService::get_track_delegation_analytics_stats`]: network-wide
//!   aggregates for one track, or per-track summaries
//! - [`AnalyticsService::get_delegation_rankings`]: leaderboards over the
//!   same aggregates
//!
//! Input is validated before any I/O. Upstream and cache failures degrade to
//! partial or zero-valued results and never surface as errors.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fanout;
pub mod metrics;
pub mod rankings;
pub mod service;
pub mod stats;

pub use config::{CacheConfig, ServiceConfig};
pub use dashboard::DashboardData;
pub use error::{ServiceError, INVALID_ADDRESS, INVALID_NETWORK, INVALID_PARAMS};
pub use fanout::settle_all;
pub use metrics::AnalyticsMetrics;
pub use rankings::{Rankings, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT};
pub use service::AnalyticsService;
pub use stats::TrackStats;
