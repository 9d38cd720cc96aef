//! Agent config.
//!
//! Same layering as the collector: defaults, optional YAML file, flags, then
//! non-empty environment variables.

use std::fs;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use ypmetrics_core::error::{MetricsError, Result};
use ypmetrics_core::net::validate_address;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Collector address, `host:port`.
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_report_interval")]
    pub report_interval: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            report_interval: default_report_interval(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.address)?;
        if self.poll_interval == 0 {
            return Err(MetricsError::InvalidData("poll interval must be at least 1 second".into()));
        }
        if self.report_interval == 0 {
            return Err(MetricsError::InvalidData("report interval must be at least 1 second".into()));
        }
        Ok(())
    }

    pub fn poll_every(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn report_every(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_report_interval() -> u64 {
    10
}
fn default_poll_interval() -> u64 {
    2
}

#[derive(Debug, Default, Parser)]
#[command(name = "ypmetrics-agent", about = "Runtime metrics agent")]
pub struct Cli {
    /// Optional YAML config file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Collector address (host:port).
    #[arg(short = 'a')]
    pub address: Option<String>,

    /// Report interval in seconds.
    #[arg(short = 'r')]
    pub report_interval: Option<u64>,

    /// Poll interval in seconds.
    #[arg(short = 'p')]
    pub poll_interval: Option<u64>,
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::Parse(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn resolve<F>(cli: Cli, env: F) -> Result<AgentConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match cli.config.as_deref() {
        Some(path) => {
            let s = fs::read_to_string(path)
                .map_err(|e| MetricsError::Io(format!("read config failed: {e}")))?;
            load_from_str(&s)?
        }
        None => AgentConfig::default(),
    };

    if let Some(v) = cli.address {
        cfg.address = v;
    }
    if let Some(v) = cli.report_interval {
        cfg.report_interval = v;
    }
    if let Some(v) = cli.poll_interval {
        cfg.poll_interval = v;
    }

    let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
    if let Some(v) = lookup("ADDRESS") {
        cfg.address = v;
    }
    if let Some(v) = lookup("REPORT_INTERVAL") {
        cfg.report_interval = parse_secs("REPORT_INTERVAL", &v)?;
    }
    if let Some(v) = lookup("POLL_INTERVAL") {
        cfg.poll_interval = parse_secs("POLL_INTERVAL", &v)?;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn parse_secs(key: &str, v: &str) -> Result<u64> {
    v.parse()
        .map_err(|e| MetricsError::Parse(format!("{key}={v:?}: {e}")))
}
