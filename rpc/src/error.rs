//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use conviction_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("server error: {0}")]
    Server(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: &'static str,
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Service(e) => e.client_message(),
            _ => "Internal server error",
        };
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse { message })).into_response()
    }
}
