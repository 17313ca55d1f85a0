use conviction_types::TypesError;
use thiserror::Error;

/// Client-facing message for an unknown network.
pub const INVALID_NETWORK: &str = "Invalid network in request header";
/// Client-facing message for an address the network cannot encode.
pub const INVALID_ADDRESS: &str = "Invalid address";
/// Client-facing message for any other malformed parameter.
pub const INVALID_PARAMS: &str = "Invalid parameters passed to the request";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{INVALID_NETWORK}: {0}")]
    InvalidNetwork(String),

    #[error("{INVALID_ADDRESS}: {0}")]
    InvalidAddress(String),

    #[error("{INVALID_PARAMS}: {0}")]
    InvalidParams(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// The fixed message shown to API clients.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidNetwork(_) => INVALID_NETWORK,
            Self::InvalidAddress(_) => INVALID_ADDRESS,
            Self::InvalidParams(_) => INVALID_PARAMS,
            Self::Config(_) => "Internal configuration error",
        }
    }
}

impl From<TypesError> for ServiceError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::UnknownNetwork(name) => Self::InvalidNetwork(name),
            other => Self::InvalidParams(other.to_string()),
        }
    }
}
