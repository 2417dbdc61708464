// ThemeDeck Services
// Business logic layer

mod asset_url;
mod backend;
mod events;
mod game_catalog;
mod game_library;
mod launcher_api;
mod notifier;
mod settings_manager;
mod settings_store;

#[cfg(test)]
pub(crate) mod testing;

pub use asset_url::*;
pub use backend::*;
pub use events::*;
pub use game_catalog::*;
pub use game_library::*;
pub use launcher_api::*;
pub use notifier::*;
pub use settings_manager::*;
pub use settings_store::*;
