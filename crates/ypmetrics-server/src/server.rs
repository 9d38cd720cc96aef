//! Collector lifecycle.
//!
//! Order on shutdown: stop accepting, drain in-flight requests, stop the
//! periodic saver, then run one final save. Saves never overlap because
//! `FileStorage` serializes them.

use std::future::Future;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::{app_state::AppState, persistence, router};

pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let saver = persistence::spawn_periodic_save(state.clone(), stop_rx);

    let app = router::build_router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("listener closed, flushing metrics");
    let _ = stop_tx.send(true);
    if let Some(handle) = saver {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "periodic saver did not stop cleanly");
        }
    }
    persistence::final_save(&state).await;
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
