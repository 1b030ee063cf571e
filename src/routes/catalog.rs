//! Read-only catalog route handlers

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::catalog::{EquipmentRecord, FunctionRecord};
use crate::error::Result;
use crate::AppState;

/// Catalog routes, to be nested under `/api/catalog`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/functions", get(list_functions))
        .route("/functions/:id", get(function))
        .route("/equipment/:id", get(equipment))
}

/// All functions, sorted by name
async fn list_functions(State(state): State<AppState>) -> Json<Vec<FunctionRecord>> {
    Json(
        state
            .catalog
            .functions_by_name()
            .into_iter()
            .cloned()
            .collect(),
    )
}

async fn function(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FunctionRecord>> {
    Ok(Json(state.catalog.function(id)?.clone()))
}

async fn equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EquipmentRecord>> {
    Ok(Json(state.catalog.equipment(id)?.clone()))
}
