// App Commands
// Tauri command handlers for the live settings store and game catalog

use std::sync::Arc;
use tauri::State;
use crate::models::{AppSettings, GameEntry};
use crate::services::Lifecycle;
use crate::state::AppState;

#[tauri::command]
pub fn get_settings(state: State<'_, Arc<AppState>>) -> AppSettings {
    state.settings.snapshot()
}

#[tauri::command]
pub fn get_lifecycle(state: State<'_, Arc<AppState>>) -> Lifecycle {
    state.settings.lifecycle()
}

/// Replace the live record; saved automatically once settings are loaded
#[tauri::command]
pub async fn update_settings(
    settings: AppSettings,
    state: State<'_, Arc<AppState>>,
) -> Result<bool, String> {
    Ok(state.settings.replace(settings).await)
}

#[tauri::command]
pub fn get_games(state: State<'_, Arc<AppState>>) -> Vec<GameEntry> {
    state.catalog.games()
}

#[tauri::command]
pub async fn load_games(state: State<'_, Arc<AppState>>) -> Result<usize, String> {
    state.load_games().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn switch_to_game(
    game_name: String,
    state: State<'_, Arc<AppState>>,
) -> Result<bool, String> {
    let game = state
        .catalog
        .find(&game_name)
        .ok_or_else(|| format!("Game not found: {game_name}"))?;
    Ok(state.switch_to_game(&game).await)
}

#[tauri::command]
pub fn toggle_drawer(state: State<'_, Arc<AppState>>) -> bool {
    state.toggle_drawer()
}

#[tauri::command]
pub fn set_drawer_open(open: bool, state: State<'_, Arc<AppState>>) {
    state.set_drawer_open(open);
}
