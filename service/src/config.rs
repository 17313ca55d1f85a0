//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use conviction_indexer::IndexerConfig;
use conviction_utils::LogFormat;

use crate::ServiceError;

/// Configuration for the analytics service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// HTTP port.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on concurrent indexer requests per dashboard request.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// `[cache]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL of network analytics and per-track summaries.
    #[serde(default = "default_analytics_ttl_secs")]
    pub analytics_ttl_secs: u64,

    /// TTL of per-address dashboards.
    #[serde(default = "default_dashboard_ttl_secs")]
    pub dashboard_ttl_secs: u64,

    /// Capacity of the in-memory cache backend.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_rpc_port() -> u16 {
    7090
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_concurrent_fetches() -> usize {
    16
}

fn default_analytics_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_dashboard_ttl_secs() -> u64 {
    5 * 60
}

fn default_max_entries() -> usize {
    10_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// `listen_addr:rpc_port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_addr, self.rpc_port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            rpc_port: default_rpc_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            indexer: IndexerConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            analytics_ttl_secs: default_analytics_ttl_secs(),
            dashboard_ttl_secs: default_dashboard_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}
