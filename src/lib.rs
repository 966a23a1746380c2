pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod rate_limit;
pub mod render;
pub mod state;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::page_handler))
        .route("/api-list", get(handlers::export_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(handlers::not_found_handler);
    with_common_layers(routes).with_state(state)
}

// Layers run outside-in: trace, request count, security headers, panic guard.
// The panic guard must stay inside the headers so 500 pages get them too.
pub fn with_common_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::map_response(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::count_requests))
        .layer(TraceLayer::new_for_http())
}

/// Periodically drop rate limit entries that can no longer reject anything.
pub async fn limiter_sweeper(state: Arc<AppState>, period: Duration) {
    let mut ticker = interval(period);
    tracing::info!(?period, "rate limit sweeper started");

    loop {
        ticker.tick().await;
        let removed = state.sweep_limiters(Instant::now());
        if removed > 0 {
            tracing::debug!(removed, "swept idle rate limit entries");
        }
    }
}
