//! HTTP client for the GraphQL chain indexer.

use async_trait::async_trait;
use conviction_types::{Address, DelegationEdge, NetworkId, TrackId};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::IndexerConfig;
use crate::error::IndexerError;
use crate::queries::{ACTIVE_PROPOSAL_STATUSES, ALL_EDGES_PAGE, TRACK_EDGES_PAGE, TRACK_SNAPSHOT};
use crate::response::{decode_edges_page, decode_track_snapshot};
use crate::source::{EdgeSource, TrackSnapshot};

/// Queries the indexer endpoint configured for each network.
///
/// Sends `POST {endpoint}` with a `{query, variables}` body and decodes the
/// `{data, errors}` envelope.
pub struct IndexerClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    config: IndexerConfig,
}

impl IndexerClient {
    /// Build a client honouring the configured timeouts.
    pub fn new(config: IndexerConfig) -> Result<Self, IndexerError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| IndexerError::Client(e.to_string()))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    async fn post_query(
        &self,
        network: NetworkId,
        query: &str,
        variables: Value,
    ) -> Result<Vec<u8>, IndexerError> {
        let url = self
            .config
            .endpoint(network)
            .ok_or(IndexerError::NoEndpoint(network))?;

        let response = self
            .http_client
            .post(url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    async fn fetch_page(
        &self,
        network: NetworkId,
        track: Option<TrackId>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<DelegationEdge>, usize), IndexerError> {
        let (query, variables) = match track {
            Some(t) => (
                TRACK_EDGES_PAGE,
                json!({ "track_eq": t, "limit": limit, "offset": offset }),
            ),
            None => (ALL_EDGES_PAGE, json!({ "limit": limit, "offset": offset })),
        };
        let body = self.post_query(network, query, variables).await?;
        decode_edges_page(&body, track)
    }
}

#[async_trait]
impl EdgeSource for IndexerClient {
    async fn fetch_track_snapshot(
        &self,
        network: NetworkId,
        address: &Address,
        track: TrackId,
    ) -> Result<TrackSnapshot, IndexerError> {
        let variables = json!({
            "address": address.as_str(),
            "track_eq": track,
            "status_in": ACTIVE_PROPOSAL_STATUSES,
        });
        let body = self.post_query(network, TRACK_SNAPSHOT, variables).await?;
        let snapshot = decode_track_snapshot(&body, track)?;
        debug!(
            network = %network,
            track,
            edges = snapshot.edges.len(),
            active_proposals = snapshot.active_proposals_count,
            "fetched track snapshot"
        );
        Ok(snapshot)
    }

    async fn fetch_edges(
        &self,
        network: NetworkId,
        track: Option<TrackId>,
    ) -> Result<Vec<DelegationEdge>, IndexerError> {
        let page_size = self.config.page_size.max(1);
        let mut edges = Vec::new();

        for page in 0..self.config.max_pages {
            let (mut batch, raw_len) = self
                .fetch_page(network, track, page_size, page * page_size)
                .await?;
            edges.append(&mut batch);
            if raw_len < page_size {
                debug!(network = %network, ?track, pages = page + 1, edges = edges.len(), "fetched all edges");
                return Ok(edges);
            }
        }

        warn!(
            network = %network,
            ?track,
            max_pages = self.config.max_pages,
            "edge paging stopped at the page limit; result may be truncated"
        );
        Ok(edges)
    }
}
