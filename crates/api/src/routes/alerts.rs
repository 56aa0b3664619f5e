//! Alert Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use model_monitor::Alert;

/// Query parameters for alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Only the most recent `limit` alerts
    pub limit: Option<usize>,
}

/// Response for alerts endpoint
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub data: Vec<Alert>,
    pub count: usize,
}

/// Response for a threshold check
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub raised: Vec<Alert>,
    pub count: usize,
}

/// Get alerts, oldest first
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AlertQuery>,
) -> Json<AlertResponse> {
    let mut alerts = state.registry.get_alerts();
    if let Some(limit) = params.limit {
        let skip = alerts.len().saturating_sub(limit);
        alerts.drain(..skip);
    }

    Json(AlertResponse {
        count: alerts.len(),
        data: alerts,
    })
}

/// Run a threshold check now
pub async fn check_thresholds(State(state): State<Arc<AppState>>) -> Json<CheckResponse> {
    let raised = state.registry.check_thresholds();
    Json(CheckResponse {
        count: raised.len(),
        raised,
    })
}
