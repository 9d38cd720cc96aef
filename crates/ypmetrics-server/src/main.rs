//! ypmetrics collector.
//!
//! Accepts metric updates over HTTP, keeps them in memory, and snapshots them
//! to a JSON file periodically, on every write, or only at shutdown.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ypmetrics_server::{app_state::AppState, config, persistence, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = config::Cli::parse();
    let cfg = config::resolve(cli, |key| std::env::var(key).ok()).context("invalid configuration")?;

    let state = AppState::new(&cfg);
    if cfg.restore {
        persistence::restore_on_start(&state);
    }

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .with_context(|| format!("failed to bind {}", cfg.address))?;

    tracing::info!(address = %cfg.address, save_mode = ?state.save_mode(), "ypmetrics-server starting");
    server::serve(listener, state, server::shutdown_signal()).await
}
