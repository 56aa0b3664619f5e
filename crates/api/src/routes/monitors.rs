//! Monitor Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use model_monitor::{DataDrift, ModelPerformance, MonitorConfig, MonitorRecord};

/// Response for the monitor list endpoint
#[derive(Debug, Serialize)]
pub struct MonitorListResponse {
    pub data: Vec<MonitorRecord>,
    pub count: usize,
}

/// Response for snapshot updates
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
}

/// List all monitors
pub async fn list_monitors(State(state): State<Arc<AppState>>) -> Json<MonitorListResponse> {
    let data = state.registry.get_monitors();
    Json(MonitorListResponse {
        count: data.len(),
        data,
    })
}

/// Register or replace a monitor
pub async fn add_monitor(
    State(state): State<Arc<AppState>>,
    Json(config): Json<MonitorConfig>,
) -> (StatusCode, Json<MonitorRecord>) {
    let record = state.registry.add_monitor(config);
    (StatusCode::CREATED, Json(record))
}

/// Get one monitor
pub async fn get_monitor(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
) -> Result<Json<MonitorRecord>, StatusCode> {
    state
        .registry
        .get_monitor(&model)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Replace a monitor's performance snapshot
pub async fn update_performance(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Json(performance): Json<ModelPerformance>,
) -> (StatusCode, Json<UpdateResponse>) {
    update_status(state.registry.update_performance(&model, performance))
}

/// Replace a monitor's drift snapshot
pub async fn update_drift(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Json(drift): Json<DataDrift>,
) -> (StatusCode, Json<UpdateResponse>) {
    update_status(state.registry.detect_data_drift(&model, drift))
}

fn update_status(updated: bool) -> (StatusCode, Json<UpdateResponse>) {
    let status = if updated {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(UpdateResponse { updated }))
}
