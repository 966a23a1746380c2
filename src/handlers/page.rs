use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::metrics::{RENDER_LATENCY, THROTTLED_TOTAL};
use crate::middleware::ClientId;
use crate::state::AppState;

// GET / - the catalog page
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    ClientId(client): ClientId,
) -> AppResult<Html<String>> {
    if !state.page_limiter.allow(&client) {
        THROTTLED_TOTAL.inc();
        return Err(AppError::Throttled {
            retry_after: state.page_limiter.interval(),
        });
    }

    let start_time = Instant::now();
    let html = state
        .renderer
        .render(&state.catalog)
        .map_err(|e| AppError::Internal(e.into()))?;
    RENDER_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Html(html))
}
