// Backend
// The native collaborator the store loads from and saves to

use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use crate::config::AppPaths;
use crate::error::{BackendError, BackendResult};
use crate::models::{AppSettings, BackgroundMode, GameEntryRaw};
use crate::services::{extension_from_url, GameLibrary, LauncherClient, SettingsManager};
use super::game_library::validate_game_name;

/// Persistence and filesystem scanning, however they are transported
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the full persisted settings record
    async fn load_settings(&self) -> BackendResult<AppSettings>;

    /// Persist the full settings record
    async fn save_settings(&self, settings: &AppSettings) -> BackendResult<()>;

    /// List detected games in display order
    async fn scan_games(&self) -> BackendResult<Vec<GameEntryRaw>>;
}

/// In-process backend over the local filesystem
#[derive(Clone)]
pub struct LocalBackend {
    settings: Arc<SettingsManager>,
    library: Arc<GameLibrary>,
    launcher: LauncherClient,
}

impl LocalBackend {
    pub fn new(settings: Arc<SettingsManager>, library: Arc<GameLibrary>) -> Self {
        Self {
            settings,
            library,
            launcher: LauncherClient::new(),
        }
    }

    pub fn with_launcher(mut self, launcher: LauncherClient) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn open(paths: &AppPaths) -> BackendResult<Self> {
        paths.ensure_dirs()?;
        Ok(Self::new(
            Arc::new(SettingsManager::new(paths)),
            Arc::new(GameLibrary::open(paths)?),
        ))
    }

    pub fn library(&self) -> &Arc<GameLibrary> {
        &self.library
    }

    /// Download the launcher's official background for `preset` and make
    /// it the game's background of `mode`'s kind
    pub async fn refresh_official_background(
        &self,
        game_name: &str,
        preset: &str,
        mode: BackgroundMode,
    ) -> BackendResult<PathBuf> {
        validate_game_name(game_name)?;

        let url = self.launcher.background_url(preset, mode).await?;
        let bytes = self.launcher.download(&url).await?;
        let extension = extension_from_url(&url, mode);

        let library = self.library.clone();
        let game_name = game_name.to_string();
        blocking(move || library.write_background(&game_name, &bytes, &extension, mode)).await
    }
}

async fn blocking<T, F>(f: F) -> BackendResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> BackendResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BackendError::Task(e.to_string()))?
}

#[async_trait]
impl Backend for LocalBackend {
    async fn load_settings(&self) -> BackendResult<AppSettings> {
        let manager = self.settings.clone();
        blocking(move || manager.load()).await
    }

    async fn save_settings(&self, settings: &AppSettings) -> BackendResult<()> {
        let manager = self.settings.clone();
        let settings = settings.clone();
        blocking(move || manager.save(&settings)).await
    }

    async fn scan_games(&self) -> BackendResult<Vec<GameEntryRaw>> {
        let library = self.library.clone();
        blocking(move || library.scan()).await
    }
}
