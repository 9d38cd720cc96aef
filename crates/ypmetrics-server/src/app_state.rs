//! Shared application state for the collector.
//!
//! Holds the one process-wide `MetricStore` plus the optional snapshot file.
//! Handlers and the periodic saver see the same store through `Arc`; nothing
//! keeps a private copy.

use std::sync::Arc;

use ypmetrics_core::error::{MetricsError, Result};
use ypmetrics_core::{FileStorage, MetricStore};

use crate::config::{SaveMode, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<MetricStore>,
    storage: Option<Arc<FileStorage>>,
    save_mode: SaveMode,
}

impl AppState {
    pub fn new(cfg: &ServerConfig) -> Self {
        let storage = cfg
            .persistence_enabled()
            .then(|| Arc::new(FileStorage::new(&cfg.file_storage_path)));
        Self::with_parts(Arc::new(MetricStore::new()), storage, cfg.save_mode())
    }

    pub fn with_parts(
        store: Arc<MetricStore>,
        storage: Option<Arc<FileStorage>>,
        save_mode: SaveMode,
    ) -> Self {
        let save_mode = if storage.is_some() { save_mode } else { SaveMode::Disabled };
        Self {
            inner: Arc::new(AppStateInner {
                store,
                storage,
                save_mode,
            }),
        }
    }

    pub fn store(&self) -> &MetricStore {
        &self.inner.store
    }

    pub fn storage(&self) -> Option<&FileStorage> {
        self.inner.storage.as_deref()
    }

    pub fn save_mode(&self) -> SaveMode {
        self.inner.save_mode
    }

    /// Save the current store contents. No-op without a storage file.
    ///
    /// File I/O runs on the blocking pool.
    pub async fn save_now(&self) -> Result<()> {
        let Some(storage) = self.inner.storage.clone() else {
            return Ok(());
        };
        let store = Arc::clone(&self.inner.store);
        tokio::task::spawn_blocking(move || storage.save_store(&store))
            .await
            .map_err(|e| MetricsError::Internal(format!("save task failed: {e}")))?
    }

    /// Hook run by both ingestion surfaces after a successful write.
    ///
    /// In sync mode the snapshot is saved before the response goes out. A
    /// failed save is logged and does not fail the request.
    pub async fn after_write(&self) {
        if self.inner.save_mode != SaveMode::Sync {
            return;
        }
        if let Err(e) = self.save_now().await {
            tracing::warn!(error = %e, "sync save failed");
        }
    }
}
