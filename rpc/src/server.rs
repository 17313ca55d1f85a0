//! Axum-based RPC server.

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::RpcError;
use crate::handlers::{self, SharedService};

pub struct RpcServer {
    service: SharedService,
}

impl RpcServer {
    pub fn new(service: SharedService) -> Self {
        Self { service }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/metrics", get(handlers::metrics))
            .route("/v1/delegations/dashboard", get(handlers::dashboard))
            .route("/v1/delegations/track-stats", get(handlers::track_stats))
            .route("/v1/delegations/rankings", get(handlers::rankings))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    /// Serve on `addr` until `shutdown` resolves.
    pub async fn serve<F>(&self, addr: &str, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = bind_listener(addr).await?;
        let local = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!(addr = %local, "RPC server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}

async fn bind_listener(addr: &str) -> Result<tokio::net::TcpListener, RpcError> {
    let bound = match addr.parse::<SocketAddr>() {
        Ok(socket_addr) => tokio::net::TcpListener::bind(socket_addr).await,
        Err(_) => tokio::net::TcpListener::bind(addr).await,
    };
    bound.map_err(|e| RpcError::Bind {
        addr: addr.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use conviction_cache::MemoryCache;
    use conviction_crypto::{encode_address, NetworkAddressEncoder};
    use conviction_nullables::NullEdgeSource;
    use conviction_service::{AnalyticsService, ServiceConfig};
    use conviction_types::{Address, Balance, DelegationEdge, LockPeriod, NetworkId};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn dot(n: u8) -> Address {
        let hex = format!("0x{}", format!("{n:02x}").repeat(32));
        encode_address(&hex, NetworkId::Polkadot).unwrap()
    }

    fn router() -> Router {
        let source = NullEdgeSource::new()
            .with_edges([DelegationEdge {
                from: dot(1),
                to: dot(2),
                balance: Balance::from(1_000_000_000_000_000_000_000u128),
                lock_period: LockPeriod::new(2),
                track: 0,
                created_at: None,
            }])
            .failing_track(1);
        let service = AnalyticsService::new(
            Arc::new(source),
            Arc::new(MemoryCache::new(100)),
            Arc::new(NetworkAddressEncoder),
            ServiceConfig::default(),
        );
        RpcServer::new(Arc::new(service)).router()
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn dashboard_reports_failed_tracks() {
        let uri = format!("/v1/delegations/dashboard?network=polkadot&address={}", dot(1));
        let (status, body) = get_json(&uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["failedTracks"], serde_json::json!([1]));

        let root = body["tracks"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["track"] == 0)
            .unwrap();
        assert_eq!(root["status"], serde_json::json!(["DELEGATED"]));
        assert_eq!(
            root["delegations"][0]["balance"],
            "1000000000000000000000"
        );
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let (status, body) =
            get_json("/v1/delegations/dashboard?network=nowhere&address=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid network in request header");

        let (status, body) =
            get_json("/v1/delegations/dashboard?network=polkadot&address=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid address");

        let (status, body) = get_json("/v1/delegations/track-stats?network=polkadot&track=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid parameters passed to the request");

        let (status, _) = get_json("/v1/delegations/track-stats").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn track_stats_shapes() {
        let (status, one) = get_json("/v1/delegations/track-stats?network=polkadot&track=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(one["totalDelegates"], 1);
        assert_eq!(one["totalCapital"], "1000000000000000000000");
        assert_eq!(one["totalVotesBalance"], "2000000000000000000000");

        let (status, all) = get_json("/v1/delegations/track-stats?network=polkadot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all["0"]["totalDelegators"], 1);
        assert_eq!(all["34"]["totalDelegates"], 0);
    }

    #[tokio::test]
    async fn rankings_route() {
        let (status, body) =
            get_json("/v1/delegations/rankings?network=polkadot&role=delegators&limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "delegators");
        assert_eq!(body["total"], 1);
        assert_eq!(body["rankings"][0]["rank"], 1);
        assert_eq!(body["rankings"][0]["address"], dot(1).as_str());
    }

    #[tokio::test]
    async fn metrics_are_plain_text() {
        let response = router()
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("conviction_cache_hits_total"));
    }

    #[tokio::test]
    async fn serve_binds_and_shuts_down() {
        let service = AnalyticsService::new(
            Arc::new(NullEdgeSource::new()),
            Arc::new(MemoryCache::new(10)),
            Arc::new(NetworkAddressEncoder),
            ServiceConfig::default(),
        );
        let server = RpcServer::new(Arc::new(service));
        server
            .serve("127.0.0.1:0", async {})
            .await
            .unwrap();

        let err = server.serve("not an address", async {}).await.unwrap_err();
        assert!(matches!(err, RpcError::Bind { .. }));
    }
}
