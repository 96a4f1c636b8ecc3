//! Liveness probe for process supervisors

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "fkig-dash".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `/health`, outside the `/api` prefix
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
