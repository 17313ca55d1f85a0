use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cached value could not be (de)serialized: {0}")]
    Serialization(String),
}
