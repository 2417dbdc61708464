// GameLibrary Service
// Scans the games directory and manages per-game assets and config

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::config::AppPaths;
use crate::error::{BackendError, BackendResult};
use crate::models::{BackgroundMode, GameConfig, GameEntryRaw};

const ICON_FILE: &str = "Icon.png";
const BACKGROUND_IMAGE_FILE: &str = "Background.png";
const BACKGROUND_VIDEO_FILES: [&str; 2] = ["Background.mp4", "Background.webm"];
const CONFIG_FILE: &str = "Config.json";
const VISIBILITY_FILE: &str = "GameIconConfig.json";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "webp", "jpg", "jpeg"];
const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "webm", "mkv"];

#[derive(Serialize, Deserialize)]
struct GameIconSetting {
    #[serde(rename = "GameName")]
    game_name: String,
    #[serde(rename = "Show")]
    show: bool,
}

#[derive(Serialize, Deserialize, Default)]
struct GameIconConfig {
    #[serde(rename = "GameIconSettingList")]
    list: Vec<GameIconSetting>,
}

/// Validate a game name before using it as a directory name
pub(crate) fn validate_game_name(name: &str) -> BackendResult<()> {
    if name.trim().is_empty() {
        return Err(BackendError::InvalidName("Game name cannot be empty".to_string()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(BackendError::InvalidName(
            "Game name cannot contain path separators".to_string(),
        ));
    }
    if name.contains("..") {
        return Err(BackendError::InvalidName("Game name cannot contain '..'".to_string()));
    }
    if name.chars().count() > 100 {
        return Err(BackendError::InvalidName(
            "Game name too long (max 100 characters)".to_string(),
        ));
    }
    Ok(())
}

/// Lowercased extension of `path`, or the mode's default when it has none
pub(crate) fn background_extension(path: &Path, mode: BackgroundMode) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| mode.default_extension().to_string())
}

/// Strip the Windows extended-length prefix and use forward slashes so the
/// asset protocol gets a POSIX-style path
fn normalize_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        raw.trim_start_matches(r"\\?\").replace('\\', "/")
    } else {
        raw.to_string()
    }
}

/// Copy `src` into `dst` recursively without replacing existing files
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else if !dst_path.exists() {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Manages the games directory
pub struct GameLibrary {
    games_dir: PathBuf,
}

impl GameLibrary {
    /// Open the games directory, seeding it from bundled games on first run
    pub fn open(paths: &AppPaths) -> BackendResult<Self> {
        if !paths.games_dir.exists() {
            match &paths.bundled_games_dir {
                Some(bundled) if bundled.is_dir() => {
                    log::info!("Seeding games from {:?} to {:?}", bundled, paths.games_dir);
                    copy_dir_recursive(bundled, &paths.games_dir)?;
                }
                _ => fs::create_dir_all(&paths.games_dir)?,
            }
        }

        Ok(Self {
            games_dir: paths.games_dir.clone(),
        })
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    /// List every game directory with its asset paths, sorted by name
    pub fn scan(&self) -> BackendResult<Vec<GameEntryRaw>> {
        log::info!("Scanning games in: {}", normalize_path(&self.games_dir));

        let visibility = self.read_visibility();
        let entries = fs::read_dir(&self.games_dir)
            .map_err(|e| BackendError::Io(format!("Failed to read games directory: {e}")))?;

        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut games = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let icon_path = dir.join(ICON_FILE);
            let background_path = dir.join(BACKGROUND_IMAGE_FILE);
            let video_path = BACKGROUND_VIDEO_FILES
                .iter()
                .map(|file| dir.join(file))
                .find(|path| path.exists());

            // Missing assets are still listed; the view shows a placeholder
            if !icon_path.exists() {
                log::warn!("Icon missing for {name}: {:?}", icon_path);
            }
            if !background_path.exists() {
                log::warn!("Background missing for {name}: {:?}", background_path);
            }

            games.push(GameEntryRaw {
                name: name.to_string(),
                icon_path: normalize_path(&icon_path),
                background_path: normalize_path(&background_path),
                background_video_path: video_path.as_deref().map(normalize_path),
                show_sidebar: visibility.get(name).copied().unwrap_or(false),
            });
        }

        Ok(games)
    }

    /// Show or hide a game's sidebar icon
    pub fn set_visibility(&self, game_name: &str, visible: bool) -> BackendResult<()> {
        validate_game_name(game_name)?;

        let path = self.games_dir.join(VISIBILITY_FILE);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| BackendError::Io(format!("Failed to read visibility config: {e}")))?;
            serde_json::from_str::<GameIconConfig>(&content)
                .map_err(|e| BackendError::Parse(format!("Failed to parse visibility config: {e}")))?
        } else {
            GameIconConfig::default()
        };

        match config.list.iter_mut().find(|item| item.game_name == game_name) {
            Some(item) => item.show = visible,
            None => config.list.push(GameIconSetting {
                game_name: game_name.to_string(),
                show: visible,
            }),
        }

        let content = serde_json::to_string_pretty(&config)
            .map_err(|e| BackendError::Parse(format!("Failed to serialize visibility config: {e}")))?;
        fs::write(&path, content)
            .map_err(|e| BackendError::Io(format!("Failed to write visibility config: {e}")))
    }

    fn read_visibility(&self) -> HashMap<String, bool> {
        let path = self.games_dir.join(VISIBILITY_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return HashMap::new();
        };

        match serde_json::from_str::<GameIconConfig>(&content) {
            Ok(config) => config
                .list
                .into_iter()
                .map(|item| (item.game_name, item.show))
                .collect(),
            Err(e) => {
                log::warn!("Failed to parse {VISIBILITY_FILE}: {e}");
                HashMap::new()
            }
        }
    }

    fn game_dir(&self, game_name: &str) -> BackendResult<PathBuf> {
        validate_game_name(game_name)?;
        Ok(self.games_dir.join(game_name))
    }

    /// Load a game's Config.json, or defaults if it has none
    pub fn load_config(&self, game_name: &str) -> BackendResult<GameConfig> {
        let path = self.game_dir(game_name)?.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(GameConfig::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| BackendError::Io(format!("Failed to read config: {e}")))?;
        serde_json::from_str(&content)
            .map_err(|e| BackendError::Parse(format!("Failed to parse config: {e}")))
    }

    pub fn save_config(&self, game_name: &str, config: &GameConfig) -> BackendResult<()> {
        let dir = self.game_dir(game_name)?;
        fs::create_dir_all(&dir)
            .map_err(|e| BackendError::Io(format!("Failed to create config directory: {e}")))?;

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| BackendError::Parse(format!("Failed to serialize config: {e}")))?;
        fs::write(dir.join(CONFIG_FILE), content)
            .map_err(|e| BackendError::Io(format!("Failed to write config: {e}")))
    }

    /// Store `config` under a new game name
    pub fn create_config(&self, new_name: &str, config: &GameConfig) -> BackendResult<()> {
        self.save_config(new_name, config)
    }

    /// Remove a game's directory with all its assets
    pub fn delete_game(&self, game_name: &str) -> BackendResult<()> {
        let dir = self.game_dir(game_name)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .map_err(|e| BackendError::Io(format!("Failed to delete directory: {e}")))?;
        }
        Ok(())
    }

    /// Copy `source` in as the game's background and record its kind.
    ///
    /// A source without an extension is stored under the mode's default one.
    pub fn import_background(
        &self,
        game_name: &str,
        source: &Path,
        mode: BackgroundMode,
    ) -> BackendResult<PathBuf> {
        validate_game_name(game_name)?;
        if !source.exists() {
            return Err(BackendError::NotFound(format!(
                "Source file does not exist: {}",
                source.display()
            )));
        }

        let extension = background_extension(source, mode);
        self.replace_background(game_name, &extension, mode, |target| {
            fs::copy(source, target).map(|_| ()).map_err(|e| {
                BackendError::Io(format!(
                    "Failed to copy file from {} to {:?}: {e}",
                    source.display(),
                    target
                ))
            })
        })
    }

    /// Store downloaded background bytes and record their kind
    pub fn write_background(
        &self,
        game_name: &str,
        bytes: &[u8],
        extension: &str,
        mode: BackgroundMode,
    ) -> BackendResult<PathBuf> {
        self.replace_background(game_name, extension, mode, |target| {
            fs::write(target, bytes)
                .map_err(|e| BackendError::Io(format!("Failed to write file: {e}")))
        })
    }

    /// Remove every background of `mode`'s kind, write the new one and
    /// record the kind in the game's config
    fn replace_background<F>(
        &self,
        game_name: &str,
        extension: &str,
        mode: BackgroundMode,
        write: F,
    ) -> BackendResult<PathBuf>
    where
        F: FnOnce(&Path) -> BackendResult<()>,
    {
        let dir = self.game_dir(game_name)?;
        fs::create_dir_all(&dir)?;

        let stale: &[&str] = match mode {
            BackgroundMode::Image => &IMAGE_EXTENSIONS,
            BackgroundMode::Video => &VIDEO_EXTENSIONS,
        };
        for ext in stale {
            let old = dir.join(format!("Background.{ext}"));
            if old.exists() {
                if let Err(e) = fs::remove_file(&old) {
                    log::warn!("Failed to remove old background {:?}: {e}", old);
                }
            }
        }

        let target = dir.join(format!("Background.{extension}"));
        write(&target)?;

        let mut config = self.load_config(game_name).unwrap_or_default();
        config.basic.background_type = mode;
        self.save_config(game_name, &config)?;

        log::info!("Stored {:?} background for {game_name}", target);
        Ok(target)
    }

    /// Copy `source` in as the game's Icon.png
    pub fn import_icon(&self, game_name: &str, source: &Path) -> BackendResult<PathBuf> {
        let dir = self.game_dir(game_name)?;
        if !source.exists() {
            return Err(BackendError::NotFound(format!("File not found: {}", source.display())));
        }
        fs::create_dir_all(&dir)?;

        let target = dir.join(ICON_FILE);
        fs::copy(source, &target)
            .map_err(|e| BackendError::Io(format!("Failed to copy icon: {e}")))?;
        Ok(target)
    }
}
