// ThemeDeck Commands
// Tauri command handlers for the web view

pub mod app;
pub mod games;
pub mod settings;
