// Application state module
// Shared state handed to every connection task

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::{Notify, RwLock};

use super::types::Config;
use crate::routing::RouteTable;
use crate::session::SessionStore;
use crate::view::{Greeter, Renderer};

/// Application state
///
/// Owns everything that outlives a single request: the route table, the
/// renderer, the session store and the wired-in greeter service. Explicit
/// construction here is the whole dependency-injection story.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    /// Write-locked only when SIGHUP swaps in a freshly loaded environment
    pub renderer: RwLock<Renderer>,
    pub sessions: SessionStore,
    pub greeter: Greeter,
    pub reload_signal: Arc<Notify>,
    pub shutdown_signal: Arc<Notify>,

    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let greeter = Greeter::default();
        Self {
            routes: RouteTable::new(),
            renderer: RwLock::new(Renderer::new(&config.templates, greeter)),
            sessions: SessionStore::new(&config.session),
            greeter,
            reload_signal: Arc::new(Notify::new()),
            shutdown_signal: Arc::new(Notify::new()),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
            config: config.clone(),
        }
    }

    /// Swap in a renderer rebuilt from the template directory.
    pub async fn reload_renderer(&self) {
        let renderer = Renderer::new(&self.config.templates, self.greeter);
        *self.renderer.write().await = renderer;
    }
}
