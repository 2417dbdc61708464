// ThemeDeck Models
// Data structures shared between the store and the backend

mod game;
mod game_config;
mod settings;

pub use game::*;
pub use game_config::*;
pub use settings::*;
