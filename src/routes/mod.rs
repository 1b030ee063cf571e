//! Service-level route handlers

pub mod catalog;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::catalog::CatalogStats;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog: CatalogStats,
}

/// Liveness check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        catalog: state.catalog.stats(),
    })
}
