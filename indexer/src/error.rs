use conviction_types::NetworkId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("failed to build indexer HTTP client: {0}")]
    Client(String),

    #[error("indexer request failed: {0}")]
    Request(String),

    #[error("indexer request timed out: {0}")]
    Timeout(String),

    #[error("indexer returned HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("indexer reported errors: {0}")]
    Graphql(String),

    #[error("malformed indexer response: {0}")]
    Decode(String),

    #[error("no indexer endpoint configured for {0}")]
    NoEndpoint(NetworkId),
}

impl From<reqwest::Error> for IndexerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            IndexerError::Timeout(e.to_string())
        } else if e.is_decode() {
            IndexerError::Decode(e.to_string())
        } else {
            IndexerError::Request(e.to_string())
        }
    }
}
