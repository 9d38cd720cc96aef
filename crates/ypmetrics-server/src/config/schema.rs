use std::time::Duration;

use serde::Deserialize;
use ypmetrics_core::error::Result;
use ypmetrics_core::net::validate_address;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    /// Seconds between periodic saves. Zero saves after every write.
    #[serde(default = "default_store_interval")]
    pub store_interval: u64,

    /// Snapshot file. Empty disables persistence entirely.
    #[serde(default = "default_file_storage_path")]
    pub file_storage_path: String,

    #[serde(default = "default_restore")]
    pub restore: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            store_interval: default_store_interval(),
            file_storage_path: default_file_storage_path(),
            restore: default_restore(),
        }
    }
}

/// How the snapshot file is kept up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Disabled,
    /// Save after every successful write.
    Sync,
    Periodic(Duration),
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.address)
    }

    pub fn persistence_enabled(&self) -> bool {
        !self.file_storage_path.is_empty()
    }

    pub fn save_mode(&self) -> SaveMode {
        if !self.persistence_enabled() {
            SaveMode::Disabled
        } else if self.store_interval == 0 {
            SaveMode::Sync
        } else {
            SaveMode::Periodic(Duration::from_secs(self.store_interval))
        }
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_store_interval() -> u64 {
    300
}
fn default_file_storage_path() -> String {
    "/tmp/metrics-db.json".into()
}
fn default_restore() -> bool {
    true
}
