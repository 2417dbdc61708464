// ThemeDeck Configuration
// Resolves where settings and game assets live on disk

use std::env;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "ThemeDeck";
const GAMES_DIR_NAME: &str = "Games";

const DATA_DIR_ENV: &str = "THEMEDECK_DATA_DIR";
const GAMES_DIR_ENV: &str = "THEMEDECK_GAMES_DIR";
const BUNDLED_GAMES_DIR_ENV: &str = "THEMEDECK_BUNDLED_GAMES_DIR";

/// Filesystem locations used by the native backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Holds settings.json and the default cache directory
    pub data_dir: PathBuf,
    /// One sub-directory per game
    pub games_dir: PathBuf,
    /// Games shipped with the app, copied into `games_dir` on first run
    pub bundled_games_dir: Option<PathBuf>,
}

impl AppPaths {
    /// Paths rooted at `data_dir` with no bundled games
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            games_dir: data_dir.join(GAMES_DIR_NAME),
            data_dir,
            bundled_games_dir: None,
        }
    }

    /// Resolve paths from the environment, falling back to the local data dir
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let mut paths = Self::new(data_dir);
        if let Some(games_dir) = env::var_os(GAMES_DIR_ENV) {
            paths.games_dir = PathBuf::from(games_dir);
        }
        paths.bundled_games_dir = env::var_os(BUNDLED_GAMES_DIR_ENV).map(PathBuf::from);
        paths
    }

    pub fn with_bundled_games(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_games_dir = Some(dir.into());
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn default_cache_dir(&self) -> PathBuf {
        self.data_dir.join("Cache")
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| Path::new(".").join(APP_DIR_NAME))
}
