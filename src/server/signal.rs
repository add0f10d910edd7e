// Signal handling module (nginx-style)
//
// Supported signals:
// - SIGHUP:  Reload templates from disk
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;

use tokio::sync::Notify;

/// Start signal handlers (Unix only)
///
/// Spawns a background task that listens for Unix signals and forwards them
/// to the server loop as reload/shutdown notifications.
#[cfg(unix)]
pub fn start_signal_handler(reload: Arc<Notify>, shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sighup = signal(SignalKind::hangup()).expect("Failed to register SIGHUP handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        println!("[SIGNAL] Signal handlers registered:");
        println!("  - SIGHUP  (kill -HUP <pid>)   : Reload templates");
        println!("  - SIGTERM (kill <pid>)        : Graceful shutdown");
        println!("  - SIGINT  (Ctrl+C)            : Graceful shutdown");
        println!("[SIGNAL] Process ID: {}", std::process::id());

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    println!("\n[SIGNAL] SIGHUP received, reloading templates");
                    reload.notify_one();
                }

                _ = sigterm.recv() => {
                    println!("\n[SIGNAL] SIGTERM received, initiating graceful shutdown");
                    shutdown.notify_waiters();
                    break;
                }

                _ = sigint.recv() => {
                    println!("\n[SIGNAL] SIGINT received, initiating graceful shutdown");
                    shutdown.notify_waiters();
                    break;
                }
            }
        }
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(_reload: Arc<Notify>, shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        println!("[SIGNAL] Windows mode: Only Ctrl+C is supported");
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[SIGNAL] Ctrl+C received, initiating shutdown...");
            shutdown.notify_waiters();
        }
    });
}
