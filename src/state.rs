// App State
// The context object the view layer talks to

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use crate::error::StoreError;
use crate::models::GameEntry;
use crate::services::{AssetResolver, Backend, EventSink, GameCatalog, Notifier, SettingsStore};

/// Settings, game catalog and UI flags for one app instance
pub struct AppState {
    pub settings: SettingsStore,
    pub catalog: GameCatalog,
    drawer_open: AtomicBool,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn Backend>,
        resolver: Arc<dyn AssetResolver>,
        notifier: Arc<dyn Notifier>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            settings: SettingsStore::new(backend.clone(), notifier.clone(), events.clone()),
            catalog: GameCatalog::new(backend, resolver, notifier, events),
            drawer_open: AtomicBool::new(false),
        }
    }

    /// Load settings and scan games concurrently.
    ///
    /// Each component reports its own failure to the user.
    pub async fn start(&self) {
        let (settings, games) = tokio::join!(self.settings.initialize(), self.catalog.reload());

        if let Err(e) = settings {
            log::warn!("Starting with default settings: {e}");
        }
        if let Err(e) = games {
            log::warn!("Starting with an empty game list: {e}");
        }
    }

    pub async fn load_games(&self) -> Result<usize, StoreError> {
        self.catalog.reload().await
    }

    pub async fn switch_to_game(&self, game: &GameEntry) -> bool {
        self.catalog.select(game, &self.settings).await
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open.load(Ordering::Relaxed)
    }

    pub fn set_drawer_open(&self, open: bool) {
        self.drawer_open.store(open, Ordering::Relaxed);
    }

    /// Flip the drawer and return the new state
    pub fn toggle_drawer(&self) -> bool {
        !self.drawer_open.fetch_xor(true, Ordering::Relaxed)
    }
}
