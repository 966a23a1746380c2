use clap::Parser;
use std::num::NonZeroU32;

pub const PLACEHOLDER_SECRET: &str = "change-me-in-production";

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "api-catalog")]
#[command(about = "Serves a static catalog of public query APIs as HTML and JSON")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Accepted requests per minute per client for the catalog page
    #[arg(long, env = "PAGE_RATE_LIMIT", default_value = "30")]
    pub page_rate_limit: NonZeroU32,

    // Accepted requests per minute per client for the JSON export
    #[arg(long, env = "EXPORT_RATE_LIMIT", default_value = "10")]
    pub export_rate_limit: NonZeroU32,

    // Seconds between sweeps of stale rate limit entries
    #[arg(long, env = "SWEEP_INTERVAL", default_value_t = 60)]
    pub sweep_interval: u64,

    // Not read by any handler
    #[arg(long, env = "SECRET_KEY", hide_env_values = true, default_value = PLACEHOLDER_SECRET)]
    pub secret_key: String,
}

impl Args {
    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET
    }
}
