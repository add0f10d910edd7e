// Server loop module
// Unified accept loop with template reload and graceful shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until a shutdown signal arrives.
///
/// SIGHUP lands here as a reload notification and swaps the renderer for a
/// freshly loaded template environment without dropping the listener.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = state.reload_signal.notified() => {
                state.reload_renderer().await;
                logger::log_templates_reloaded();
            }

            () = state.shutdown_signal.notified() => {
                logger::log_shutdown_requested();
                break;
            }
        }
    }

    // Stop accepting, then give in-flight connections a moment to finish
    drop(listener);
    drain_connections(&active_connections).await;
    logger::log_shutdown_complete();
    Ok(())
}

/// Wait up to five seconds for active connections to finish naturally.
async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown drain timed out with {remaining} connections still active"
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
