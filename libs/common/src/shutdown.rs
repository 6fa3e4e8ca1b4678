//! Shutdown signal handling
//!
//! `wait_for_shutdown` resolves once the process is asked to stop:
//! Ctrl+C everywhere, plus SIGTERM on Unix so container runtimes can
//! stop the service cleanly.

use tracing::{info, warn};

/// Block until a shutdown signal arrives
pub async fn wait_for_shutdown() {
    let signal = tokio::select! {
        _ = interrupt() => "interrupt",
        _ = terminate() => "terminate",
    };
    info!("Received {} signal, shutting down", signal);
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        },
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        },
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await
}
