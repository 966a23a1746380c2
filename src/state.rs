use axum::body::Bytes;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{ApiDescriptor, Catalog};
use crate::config::Args;
use crate::metrics::TRACKED_CLIENTS;
use crate::rate_limit::RateLimiter;
use crate::render::PageRenderer;

// JSON export envelope
#[derive(serde::Serialize)]
struct Export<'a> {
    total: usize,
    apis: &'a [ApiDescriptor],
}

/// The JSON export, serialized once. The catalog never changes, so neither does this.
pub struct ExportBody {
    pub body: Bytes, // shared by every response, cloning is a refcount bump
    pub etag: String,
}

impl ExportBody {
    pub fn new(catalog: &Catalog) -> serde_json::Result<Self> {
        let body = serde_json::to_string_pretty(&Export {
            total: catalog.count(),
            apis: catalog.all(),
        })?;
        let etag = format!("\"{:x}\"", Sha256::digest(body.as_bytes()));
        Ok(Self {
            body: Bytes::from(body),
            etag,
        })
    }

    /// True when an `If-None-Match` value names this body.
    pub fn matches(&self, if_none_match: &str) -> bool {
        if_none_match
            .split(',')
            .map(|tag| tag.trim().trim_start_matches("W/"))
            .any(|tag| tag == "*" || tag == self.etag)
    }
}

// app's shared state, built once at startup
pub struct AppState {
    pub catalog: Catalog,
    pub renderer: PageRenderer,
    pub export: ExportBody,
    pub page_limiter: RateLimiter,   // GET /
    pub export_limiter: RateLimiter, // GET /api-list
}

impl AppState {
    pub fn new(catalog: Catalog, args: &Args) -> anyhow::Result<Arc<Self>> {
        let renderer = PageRenderer::new()?;
        let export = ExportBody::new(&catalog)?;
        Ok(Arc::new(Self {
            catalog,
            renderer,
            export,
            page_limiter: RateLimiter::per_minute("page", args.page_rate_limit),
            export_limiter: RateLimiter::per_minute("export", args.export_rate_limit),
        }))
    }

    pub fn limiters(&self) -> [&RateLimiter; 2] {
        [&self.page_limiter, &self.export_limiter]
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiters().iter().map(|l| l.tracked()).sum()
    }

    /// Copy the current limiter size into the tracked-clients gauge.
    pub fn refresh_tracked_gauge(&self) {
        TRACKED_CLIENTS.set(self.tracked_clients() as f64);
    }

    /// Sweep both limiters and refresh the tracked-clients gauge.
    pub fn sweep_limiters(&self, now: Instant) -> usize {
        let removed = self.limiters().iter().map(|l| l.sweep(now)).sum();
        self.refresh_tracked_gauge();
        removed
    }
}
