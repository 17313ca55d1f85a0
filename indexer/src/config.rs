use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use conviction_types::NetworkId;

/// Connection settings for the chain indexer (`[indexer]` table).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `limit` used when paging through all edges.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hard stop on paging, whatever the indexer keeps returning.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// GraphQL endpoint per network name.
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<String, String>,
}

fn default_endpoints() -> BTreeMap<String, String> {
    NetworkId::ALL
        .iter()
        .filter(|n| !n.tracks().is_empty())
        .map(|n| {
            (
                n.as_str().to_string(),
                format!("https://squid.subsquid.io/polkassembly-{}/graphql", n.as_str()),
            )
        })
        .collect()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    1000
}

fn default_max_pages() -> usize {
    100
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            endpoints: default_endpoints(),
        }
    }
}

impl IndexerConfig {
    pub fn endpoint(&self, network: NetworkId) -> Option<&str> {
        self.endpoints.get(network.as_str()).map(String::as_str)
    }

    /// Point `network` at `url`, replacing any configured endpoint.
    pub fn with_endpoint(mut self, network: NetworkId, url: impl Into<String>) -> Self {
        self.endpoints.insert(network.as_str().to_string(), url.into());
        self
    }
}
