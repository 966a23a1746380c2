mod export;
mod health;
mod metrics;
mod page;

pub use export::export_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use page::page_handler;

use crate::error::AppError;

// Unmatched paths
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
