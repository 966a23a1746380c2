use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use api_catalog::catalog::Catalog;
use api_catalog::config::Args;
use api_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // parse cli arguments (env vars fill in missing flags)
    let args = Args::parse();
    if args.uses_placeholder_secret() {
        warn!("SECRET_KEY not set, using the placeholder value");
    }

    let catalog = Catalog::builtin().context("invalid built-in catalog")?;
    let state = AppState::new(catalog, &args).context("failed to build application state")?;

    if args.sweep_interval > 0 {
        let sweep_state = state.clone();
        let period = Duration::from_secs(args.sweep_interval);
        tokio::spawn(async move {
            api_catalog::limiter_sweeper(sweep_state, period).await;
        });
    }

    let app = api_catalog::app(state.clone());

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        apis = state.catalog.count(),
        page_rate_limit = args.page_rate_limit.get(),
        export_rate_limit = args.export_rate_limit.get(),
        "API catalog listening"
    );

    // peer address is the rate limit identifier
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
