use axum::Json;
use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    total_apis: usize,
}

// GET /health - never throttled
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        total_apis: state.catalog.count(),
    })
}
