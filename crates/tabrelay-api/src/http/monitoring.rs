//! Monitoring and health check handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use tabrelay_core::RegistryStats;

use crate::state::AppState;

/// Sends needed before the failure ratio is taken into account.
const MIN_SENDS_FOR_RATIO: u64 = 20;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// More than one recipient send in ten has failed.
    Degraded,
}

impl HealthStatus {
    pub fn from_stats(stats: &RegistryStats) -> Self {
        let sends = stats.frames_delivered + stats.send_failures;
        if sends >= MIN_SENDS_FOR_RATIO && stats.send_failures * 10 > sends {
            Self::Degraded
        } else {
            Self::Healthy
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Live WebSocket connections.
    pub connections: usize,
    /// Users with at least one live connection.
    pub users: usize,
}

/// Detailed health check.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.registry.stats();

    Json(HealthResponse {
        status: HealthStatus::from_stats(&stats),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        connections: stats.connections,
        users: stats.users,
    })
}

/// Registry statistics.
pub async fn registry_stats(State(state): State<Arc<AppState>>) -> Json<RegistryStats> {
    Json(state.registry.stats())
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}
