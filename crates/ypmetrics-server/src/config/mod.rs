//! Collector config loader.
//!
//! Layers, lowest precedence first: defaults, optional YAML file (strict
//! parsing), command-line flags, then non-empty environment variables.

pub mod schema;

use std::fs;

use clap::Parser;
use ypmetrics_core::error::{MetricsError, Result};

pub use schema::{SaveMode, ServerConfig};

#[derive(Debug, Default, Parser)]
#[command(name = "ypmetrics-server", about = "Metrics collector")]
pub struct Cli {
    /// Optional YAML config file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Listen address (host:port).
    #[arg(short = 'a')]
    pub address: Option<String>,

    /// Store interval in seconds (0 = save on every write).
    #[arg(short = 'i')]
    pub store_interval: Option<u64>,

    /// File storage path (empty disables persistence).
    #[arg(short = 'f')]
    pub file_storage_path: Option<String>,

    /// Restore from file on start.
    #[arg(short = 'r', num_args = 0..=1, default_missing_value = "true")]
    pub restore: Option<bool>,
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Io(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::Parse(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Boolean spellings accepted from the environment: `1 t T TRUE true True`
/// and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Build the effective config. `env` looks up one variable by name.
pub fn resolve<F>(cli: Cli, env: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match cli.config.as_deref() {
        Some(path) => load_from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(v) = cli.address {
        cfg.address = v;
    }
    if let Some(v) = cli.store_interval {
        cfg.store_interval = v;
    }
    if let Some(v) = cli.file_storage_path {
        cfg.file_storage_path = v;
    }
    if let Some(v) = cli.restore {
        cfg.restore = v;
    }

    let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
    if let Some(v) = lookup("ADDRESS") {
        cfg.address = v;
    }
    if let Some(v) = lookup("STORE_INTERVAL") {
        cfg.store_interval = v
            .parse()
            .map_err(|e| MetricsError::Parse(format!("STORE_INTERVAL={v:?}: {e}")))?;
    }
    if let Some(v) = lookup("FILE_STORAGE_PATH") {
        cfg.file_storage_path = v;
    }
    if let Some(v) = lookup("RESTORE") {
        cfg.restore = parse_bool(&v)
            .ok_or_else(|| MetricsError::Parse(format!("RESTORE={v:?}: not a boolean")))?;
    }

    cfg.validate()?;
    Ok(cfg)
}
