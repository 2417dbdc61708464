// Settings Commands
// Tauri command handlers for settings persistence

use tauri::State;
use crate::models::AppSettings;
use crate::services::{Backend, LocalBackend};

/// Load the persisted settings record
#[tauri::command]
pub async fn load_settings(backend: State<'_, LocalBackend>) -> Result<AppSettings, String> {
    backend.load_settings().await.map_err(|e| e.to_string())
}

/// Persist the full settings record
#[tauri::command]
pub async fn save_settings(
    config: AppSettings,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend.save_settings(&config).await.map_err(|e| e.to_string())
}
