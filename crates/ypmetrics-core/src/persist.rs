//! File persistence for store snapshots.
//!
//! The on-disk format is the JSON form of `Snapshot`:
//! `{"gauges": {name: f64}, "counters": {name: i64}}`.
//!
//! Saves write a uniquely named temporary file in the target directory, fsync
//! it, and rename it over the target, so a reader sees either the old or the
//! new file. Saves from the same `FileStorage` hold a mutex from the store
//! dump through the rename, so a later save never gets overwritten by an
//! older snapshot.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::error::{MetricsError, Result};
use crate::store::{MetricStore, Snapshot};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `snapshot` and atomically replace the file.
    ///
    /// Fails without touching the file if a gauge is not finite.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let _guard = self.lock()?;
        self.write_snapshot(snapshot)
    }

    /// Read the file back.
    ///
    /// A missing or empty file means "no prior state" and yields an empty
    /// snapshot. Anything else that does not decode is a `Parse` error.
    pub fn load(&self) -> Result<Snapshot> {
        let data = match fs::read(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(e) => {
                return Err(MetricsError::Io(format!(
                    "read {} failed: {e}",
                    self.path.display()
                )))
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Snapshot::default());
        }

        serde_json::from_slice(&data).map_err(|e| {
            MetricsError::Parse(format!("invalid snapshot in {}: {e}", self.path.display()))
        })
    }

    /// Dump `store` and save it.
    ///
    /// The dump is taken under the write lock, so saves land in the order
    /// their dumps were taken.
    pub fn save_store(&self, store: &MetricStore) -> Result<()> {
        let _guard = self.lock()?;
        self.write_snapshot(&store.dump_all())
    }

    /// Load the file and apply it to `store` through the update paths
    /// (counters accumulate). Returns the number of entries applied.
    pub fn restore_into(&self, store: &MetricStore) -> Result<usize> {
        let snapshot = self.load()?;
        Ok(store.load_snapshot(snapshot))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| MetricsError::Internal("snapshot write lock poisoned".into()))
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some((name, v)) = snapshot.gauges.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MetricsError::InvalidData(format!(
                "gauge '{name}' has non-finite value {v}"
            )));
        }
        let data = serde_json::to_vec(snapshot)
            .map_err(|e| MetricsError::Internal(format!("encode snapshot failed: {e}")))?;
        write_atomic(&self.path, &data)
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&parent)
        .map_err(|e| MetricsError::Io(format!("create {} failed: {e}", parent.display())))?;

    // dropping the temp file on any error path removes it
    let mut temp = NamedTempFile::new_in(&parent)
        .map_err(|e| MetricsError::Io(format!("create temp file in {} failed: {e}", parent.display())))?;
    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| MetricsError::Io(format!("write {} failed: {e}", temp.path().display())))?;

    temp.persist(path)
        .map(|_| ())
        .map_err(|e| MetricsError::Io(format!("rename onto {} failed: {}", path.display(), e.error)))
}
