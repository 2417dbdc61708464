// ThemeDeck - State layer
// Settings store, game catalog and the native backend behind them

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

#[cfg(feature = "desktop")]
mod commands;

pub use config::AppPaths;
pub use error::{BackendError, StoreError};
pub use state::AppState;

/// Tauri builder with plugins, app state and commands registered.
/// Settings and games start loading as soon as setup finishes.
/// The application binary supplies `generate_context!()` and runs it.
#[cfg(feature = "desktop")]
pub fn builder() -> tauri::Builder<tauri::Wry> {
    use std::sync::Arc;
    use tauri::Manager;
    use tauri_plugin_log::{Target, TargetKind};

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let mut targets = vec![
                Target::new(TargetKind::LogDir {
                    file_name: Some("themedeck".to_string()),
                }),
                Target::new(TargetKind::Webview),
            ];
            if cfg!(debug_assertions) {
                targets.push(Target::new(TargetKind::Stdout));
            }
            app.handle().plugin(
                tauri_plugin_log::Builder::default()
                    .level(log::LevelFilter::Info)
                    .targets(targets)
                    .build(),
            )?;

            let mut paths = AppPaths::from_env();
            if paths.bundled_games_dir.is_none() {
                if let Ok(resource_dir) = app.path().resource_dir() {
                    let bundled = resource_dir.join("Games");
                    if bundled.is_dir() {
                        paths.bundled_games_dir = Some(bundled);
                    }
                }
            }

            let backend = services::LocalBackend::open(&paths)?;
            let handle = app.handle().clone();
            let state = Arc::new(AppState::new(
                Arc::new(backend.clone()),
                Arc::new(services::AssetProtocol::for_current_platform()),
                Arc::new(services::DialogNotifier::new(handle.clone())),
                Arc::new(services::WebviewEvents::new(handle)),
            ));
            app.manage(backend);
            app.manage(state.clone());

            tauri::async_runtime::spawn(async move {
                state.start().await;
            });

            log::info!("ThemeDeck initialized. Data dir: {:?}", paths.data_dir);
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                if let Some(state) = window.try_state::<Arc<AppState>>() {
                    let state = state.inner().clone();
                    tauri::async_runtime::block_on(async move {
                        state.settings.flush().await;
                    });
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::app::get_settings,
            commands::app::get_lifecycle,
            commands::app::update_settings,
            commands::app::get_games,
            commands::app::load_games,
            commands::app::switch_to_game,
            commands::app::toggle_drawer,
            commands::app::set_drawer_open,
            commands::settings::load_settings,
            commands::settings::save_settings,
            commands::games::scan_games,
            commands::games::set_game_visibility,
            commands::games::load_game_config,
            commands::games::save_game_config,
            commands::games::create_new_config,
            commands::games::delete_game_config_folder,
            commands::games::set_game_background,
            commands::games::set_game_icon,
            commands::games::update_game_background,
        ])
}
