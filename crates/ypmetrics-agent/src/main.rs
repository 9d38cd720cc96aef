//! ypmetrics agent.
//!
//! Polls runtime gauges every poll interval and pushes them to the collector
//! every report interval until interrupted.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ypmetrics_agent::runtime_stats::CountingAlloc;
use ypmetrics_agent::{config, Agent, HttpSink};

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc::new();

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = config::Cli::parse();
    let cfg = config::resolve(cli, |key| std::env::var(key).ok()).context("invalid configuration")?;

    let sink = HttpSink::new(&cfg.address).context("failed to build http client")?;
    tracing::info!(
        url = %sink.url(),
        poll_interval = cfg.poll_interval,
        report_interval = cfg.report_interval,
        "ypmetrics-agent starting"
    );

    let agent = Arc::new(Agent::new(&cfg, Arc::new(sink)));

    tokio::select! {
        _ = agent.run() => {},
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
            }
            tracing::info!("signal received, stopping agent");
        }
    }
    Ok(())
}
