use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

pub const NOT_FOUND_PAGE: &str =
    "<h1>404 - Sayfa Bulunamadı</h1><p>İstediğiniz sayfa mevcut değil.</p>";
pub const THROTTLED_PAGE: &str =
    "<h1>429 - Çok Fazla İstek</h1><p>Lütfen daha yavaş istek gönderin.</p>";
pub const INTERNAL_ERROR_PAGE: &str =
    "<h1>500 - Sunucu Hatası</h1><p>Bir şeyler yanlış gitti.</p>";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("too many requests")]
    Throttled { retry_after: Duration },

    #[error("not found")]
    NotFound,

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Throttled { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs(retry_after).to_string())],
                Html(THROTTLED_PAGE),
            )
                .into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_ERROR_PAGE)).into_response()
            }
        }
    }
}

// Whole seconds, rounded up, never zero
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

pub type AppResult<T> = Result<T, AppError>;
