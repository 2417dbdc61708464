// SettingsManager Service
// Handles application settings persistence

use std::path::{Path, PathBuf};
use std::sync::RwLock;
use serde_json::Value;
use crate::config::AppPaths;
use crate::error::{BackendError, BackendResult};
use crate::models::AppSettings;

/// Manages application settings storage and retrieval
pub struct SettingsManager {
    settings_path: PathBuf,
    default_cache_dir: PathBuf,
    cache: RwLock<Option<AppSettings>>,
}

impl SettingsManager {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            settings_path: paths.settings_path(),
            default_cache_dir: paths.default_cache_dir(),
            cache: RwLock::new(None),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or write and return defaults if not found
    pub fn load(&self) -> BackendResult<AppSettings> {
        if let Ok(cache) = self.cache.read() {
            if let Some(ref settings) = *cache {
                return Ok(settings.clone());
            }
        }

        let mut settings = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)
                .map_err(|e| BackendError::Io(format!("Failed to read settings: {e}")))?;

            let mut user_value: Value = serde_json::from_str(&content)
                .map_err(|e| BackendError::Parse(format!("Failed to parse settings: {e}")))?;

            let defaults_value = serde_json::to_value(AppSettings::default())
                .map_err(|e| BackendError::Parse(format!("Failed to build default settings: {e}")))?;

            let changed = merge_missing_settings(&mut user_value, &defaults_value);

            let settings: AppSettings = serde_json::from_value(user_value)
                .map_err(|e| BackendError::Parse(format!("Failed to parse settings: {e}")))?;

            if changed {
                log::info!("Filled missing settings keys with defaults");
                self.save_internal(&settings)?;
            }

            settings
        } else {
            log::info!("No settings file at {:?}, writing defaults", self.settings_path);
            let defaults = AppSettings::default();
            self.save_internal(&defaults)?;
            defaults
        };

        if settings.cache_directory.trim().is_empty() {
            settings.cache_directory = self.default_cache_dir.to_string_lossy().to_string();
        }
        if let Err(e) = std::fs::create_dir_all(&settings.cache_directory) {
            log::warn!("Failed to create cache directory {:?}: {e}", settings.cache_directory);
        }

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, settings: &AppSettings) -> BackendResult<()> {
        self.save_internal(settings)?;

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(())
    }

    /// Internal save without cache update
    fn save_internal(&self, settings: &AppSettings) -> BackendResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BackendError::Io(format!("Failed to create settings directory: {e}")))?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| BackendError::Parse(format!("Failed to serialize settings: {e}")))?;

        std::fs::write(&self.settings_path, content)
            .map_err(|e| BackendError::Io(format!("Failed to write settings: {e}")))
    }
}

/// Recursively add keys present in `defaults` but missing from `target`.
/// Returns true if anything was added.
fn merge_missing_settings(target: &mut Value, defaults: &Value) -> bool {
    match (target, defaults) {
        (Value::Object(target_map), Value::Object(defaults_map)) => {
            let mut changed = false;
            for (key, default_value) in defaults_map {
                match target_map.get_mut(key) {
                    Some(target_value) => {
                        if merge_missing_settings(target_value, default_value) {
                            changed = true;
                        }
                    }
                    None => {
                        target_map.insert(key.clone(), default_value.clone());
                        changed = true;
                    }
                }
            }
            changed
        }
        _ => false,
    }
}
