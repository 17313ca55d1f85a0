//! RPC request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use conviction_service::{AnalyticsService, DashboardData, Rankings, TrackStats};

use crate::error::RpcError;

pub type SharedService = Arc<AnalyticsService>;

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ── Dashboard ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub address: String,
    pub track: Option<String>,
}

pub async fn dashboard(
    State(service): State<SharedService>,
    Query(q): Query<DashboardQuery>,
) -> Result<Json<DashboardData>, RpcError> {
    let data = service
        .get_delegation_dashboard_data(&q.address, &q.network, q.track.as_deref())
        .await?;
    Ok(Json(data))
}

// ── Track stats ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TrackStatsQuery {
    #[serde(default)]
    pub network: String,
    pub track: Option<String>,
}

pub async fn track_stats(
    State(service): State<SharedService>,
    Query(q): Query<TrackStatsQuery>,
) -> Result<Json<TrackStats>, RpcError> {
    let stats = service
        .get_track_delegation_analytics_stats(&q.network, q.track.as_deref())
        .await?;
    Ok(Json(stats))
}

// ── Rankings ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RankingsQuery {
    #[serde(default)]
    pub network: String,
    pub track: Option<String>,
    pub role: Option<String>,
    pub limit: Option<String>,
}

pub async fn rankings(
    State(service): State<SharedService>,
    Query(q): Query<RankingsQuery>,
) -> Result<Json<Rankings>, RpcError> {
    let rankings = service
        .get_delegation_rankings(
            &q.network,
            q.track.as_deref(),
            q.role.as_deref(),
            q.limit.as_deref(),
        )
        .await?;
    Ok(Json(rankings))
}

// ── Metrics ──────────────────────────────────────────────────────────────

pub async fn metrics(State(service): State<SharedService>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        service.metrics().render(),
    )
}
