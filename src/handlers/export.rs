use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::metrics::THROTTLED_TOTAL;
use crate::middleware::ClientId;
use crate::state::AppState;

pub const EXPORT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// GET /api-list - the whole catalog as JSON
pub async fn export_handler(
    State(state): State<Arc<AppState>>,
    ClientId(client): ClientId,
    headers: HeaderMap,
) -> AppResult<Response> {
    // throttle first, a conditional request still counts
    if !state.export_limiter.allow(&client) {
        THROTTLED_TOTAL.inc();
        return Err(AppError::Throttled {
            retry_after: state.export_limiter.interval(),
        });
    }

    let etag = state.export.etag.as_str();
    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| state.export.matches(v));
    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [(header::CONTENT_TYPE, EXPORT_CONTENT_TYPE), (header::ETAG, etag)],
        state.export.body.clone(),
    )
        .into_response())
}
