// GameCatalog Service
// Holds the scanned game list and applies a game's look to the settings

use std::sync::Arc;
use tokio::sync::watch;
use crate::error::StoreError;
use crate::models::{BackgroundMode, GameEntry};
use crate::services::{
    emit_event, AppEvent, AssetResolver, Backend, EventSink, Notice, Notifier, SettingsStore,
};

pub struct GameCatalog {
    games: watch::Sender<Vec<GameEntry>>,
    backend: Arc<dyn Backend>,
    resolver: Arc<dyn AssetResolver>,
    notifier: Arc<dyn Notifier>,
    events: Arc<dyn EventSink>,
}

impl GameCatalog {
    pub fn new(
        backend: Arc<dyn Backend>,
        resolver: Arc<dyn AssetResolver>,
        notifier: Arc<dyn Notifier>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let (games, _) = watch::channel(Vec::new());
        Self {
            games,
            backend,
            resolver,
            notifier,
            events,
        }
    }

    /// Rescan games and replace the whole list.
    ///
    /// On failure the previous list is kept.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let raw = match self.backend.scan_games().await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Failed to scan games: {e}");
                self.notifier
                    .notify(Notice::warning(format!("Failed to scan games: {e}")));
                return Err(StoreError::Load(e));
            }
        };

        let entries: Vec<GameEntry> = raw
            .into_iter()
            .map(|game| GameEntry::from_raw(game, self.resolver.as_ref()))
            .collect();
        let count = entries.len();
        log::info!("Scanned {count} game(s)");

        emit_event(self.events.as_ref(), AppEvent::GamesUpdated, &entries);
        self.games.send_replace(entries);
        Ok(count)
    }

    pub fn games(&self) -> Vec<GameEntry> {
        self.games.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<GameEntry>> {
        self.games.subscribe()
    }

    pub fn find(&self, name: &str) -> Option<GameEntry> {
        self.games.borrow().iter().find(|game| game.name == name).cloned()
    }

    /// Make `game` the active profile and switch the background to it.
    ///
    /// In video mode only a game with its own video changes the background;
    /// otherwise the current video stays. Any other mode switches to the
    /// game's image.
    pub async fn select(&self, game: &GameEntry, store: &SettingsStore) -> bool {
        log::info!("Switching to game '{}'", game.name);

        store
            .update(|settings| {
                match settings.background_mode {
                    BackgroundMode::Video => {
                        if let Some(video) = game.raw_background_video_path.as_deref() {
                            settings.background_video_path = self.resolver.to_asset_url(video);
                        }
                    }
                    BackgroundMode::Image => {
                        settings.background_image_path = match game.raw_background_path.as_deref() {
                            Some(path) => self.resolver.to_asset_url(path),
                            None => game.background_url.clone(),
                        };
                    }
                }
                settings.active_profile_name = game.name.clone();
            })
            .await
    }
}
