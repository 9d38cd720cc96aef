//! Snapshot scheduling: restore on start, periodic saves, final save.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::app_state::AppState;
use crate::config::SaveMode;

/// Load the snapshot file into the store before the listener opens.
///
/// A missing file is an empty start; any other failure is logged and the
/// collector starts empty.
pub fn restore_on_start(app: &AppState) {
    let Some(storage) = app.storage() else {
        return;
    };
    match storage.restore_into(app.store()) {
        Ok(n) => tracing::info!(path = %storage.path().display(), restored = n, "metrics restored"),
        Err(e) => tracing::warn!(path = %storage.path().display(), error = %e, "could not load metrics from file"),
    }
}

/// Spawn the periodic saver when the save mode asks for one.
///
/// The task exits once `shutdown` flips to `true` (or its sender is dropped).
pub fn spawn_periodic_save(app: AppState, shutdown: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
    match app.save_mode() {
        SaveMode::Periodic(every) => Some(tokio::spawn(run_periodic_save(app, every, shutdown))),
        SaveMode::Sync | SaveMode::Disabled => None,
    }
}

async fn run_periodic_save(app: AppState, every: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut tick = interval_at(Instant::now() + every, every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match app.save_now().await {
                    Ok(()) => tracing::debug!("periodic save done"),
                    Err(e) => tracing::warn!(error = %e, "periodic save failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}

/// Best-effort save after the listener has drained. Failures are logged and
/// swallowed.
pub async fn final_save(app: &AppState) {
    if app.storage().is_none() {
        return;
    }
    match app.save_now().await {
        Ok(()) => tracing::info!("metrics saved on shutdown"),
        Err(e) => tracing::error!(error = %e, "saving metrics on shutdown failed"),
    }
}
