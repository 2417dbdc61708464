// Game Config Model
// Per-game Config.json stored next to each game's assets

use serde::{Deserialize, Serialize};
use crate::models::BackgroundMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSettings {
    #[serde(default = "default_game_preset")]
    pub game_preset: String,
    #[serde(default)]
    pub background_type: BackgroundMode,
}

fn default_game_preset() -> String {
    "Default".to_string()
}

impl Default for BasicSettings {
    fn default() -> Self {
        Self {
            game_preset: default_game_preset(),
            background_type: BackgroundMode::Image,
        }
    }
}

/// Per-game configuration. Sections other than `basic` are owned by the
/// view layer and passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default)]
    pub basic: BasicSettings,
    #[serde(default)]
    pub three_d_migoto: serde_json::Value,
    #[serde(default)]
    pub other: serde_json::Value,
}
