// Game Commands
// Tauri command handlers for the game library

use std::path::PathBuf;
use tauri::State;
use crate::models::{BackgroundMode, GameConfig, GameEntryRaw};
use crate::services::{Backend, LocalBackend};

#[tauri::command]
pub async fn scan_games(backend: State<'_, LocalBackend>) -> Result<Vec<GameEntryRaw>, String> {
    backend.scan_games().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_game_visibility(
    game_name: String,
    visible: bool,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .library()
        .set_visibility(&game_name, visible)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn load_game_config(
    game_name: String,
    backend: State<'_, LocalBackend>,
) -> Result<GameConfig, String> {
    backend.library().load_config(&game_name).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn save_game_config(
    game_name: String,
    config: GameConfig,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .library()
        .save_config(&game_name, &config)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_new_config(
    new_name: String,
    config: GameConfig,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .library()
        .create_config(&new_name, &config)
        .map_err(|e| e.to_string())
}

/// Remove a game's folder with its config and assets (destructive)
#[tauri::command]
pub fn delete_game_config_folder(
    game_name: String,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend.library().delete_game(&game_name).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_game_background(
    game_name: String,
    file_path: String,
    bg_type: BackgroundMode,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .library()
        .import_background(&game_name, &PathBuf::from(file_path), bg_type)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_game_icon(
    game_name: String,
    file_path: String,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .library()
        .import_icon(&game_name, &PathBuf::from(file_path))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Replace a game's background with the launcher's official one
#[tauri::command]
pub async fn update_game_background(
    game_name: String,
    game_preset: String,
    bg_type: BackgroundMode,
    backend: State<'_, LocalBackend>,
) -> Result<(), String> {
    backend
        .refresh_official_background(&game_name, &game_preset, bg_type)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}
