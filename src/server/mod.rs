// Server module entry point
// Listener construction, the accept loop, per-connection serving, and
// shutdown signal handling.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;
pub use signal::start_signal_handler;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// How long shutdown waits for in-flight connections before giving up
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` fires.
///
/// Each accepted connection is served in its own task; accept errors are
/// logged and the loop continues. On shutdown the listener is dropped
/// immediately and in-flight connections get a bounded drain window.
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    // Close the listening socket before draining so no new connections land.
    drop(listener);
    drain_connections(&active_connections).await;
}

/// Wait for active connections to finish, up to the drain deadline.
async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_DRAIN;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown drain timed out with {active} connections still active"
            ));
            break;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}
