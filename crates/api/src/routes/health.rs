use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the catalog and sprite trees exist, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub data_dir_present: bool,
    pub image_dir_present: bool,
    pub activity_dir_present: bool,
}

/// GET /health -- returns service status and which input trees exist.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = mwres_store::health_check(&state.layout).await;

    let status = if health.is_healthy() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        data_dir_present: health.data_dir_present,
        image_dir_present: health.image_dir_present,
        activity_dir_present: health.activity_dir_present,
    })
}

/// Mount health check routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
