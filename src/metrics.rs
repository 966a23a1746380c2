use lazy_static::lazy_static;
use prometheus::{
    Counter, Encoder, Gauge, Histogram, TextEncoder, register_counter, register_gauge,
    register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("catalog_requests_total", "Total number of requests").unwrap();
    pub static ref THROTTLED_TOTAL: Counter =
        register_counter!("catalog_throttled_total", "Requests rejected by a rate limiter").unwrap();
    pub static ref RENDER_LATENCY: Histogram = register_histogram!(
        "catalog_page_render_seconds",
        "Catalog page render time in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "catalog_rate_limit_clients",
        "Client identifiers held across all rate limiters"
    )
    .unwrap();
}

// Prometheus text exposition of every registered metric
pub fn encode() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
