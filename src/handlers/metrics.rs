use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::state::AppState;

// GET /metrics - prometheus text format
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    // the sweeper may be off, so read the limiter size now
    state.refresh_tracked_gauge();
    let body = metrics::encode()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("metrics encoding failed: {e}")))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
