// Signal handling module
//
// SIGTERM and SIGINT both trigger a clean shutdown; no other signals are
// handled.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal listener (Unix).
///
/// Spawns a background task that fires `shutdown` once on the first
/// SIGTERM or SIGINT.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => crate::logger::log_signal("SIGTERM"),
            _ = sigint.recv() => crate::logger::log_signal("SIGINT"),
        }

        shutdown.notify_one();
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_signal("Ctrl+C");
            shutdown.notify_one();
        }
    });
}
