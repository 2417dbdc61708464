// Settings Model
// The single appearance record the web view reads and writes

use serde::{Deserialize, Serialize};

/// Which background asset is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Image,
    Video,
}

impl BackgroundMode {
    /// Extension used when an asset's own name carries none
    pub fn default_extension(self) -> &'static str {
        match self {
            BackgroundMode::Image => "png",
            BackgroundMode::Video => "mp4",
        }
    }
}

/// Application settings
///
/// Wire names follow the existing `settings.json` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    // Background
    #[serde(rename = "bgType")]
    pub background_mode: BackgroundMode,
    #[serde(rename = "bgImage")]
    pub background_image_path: String,
    #[serde(rename = "bgVideo")]
    pub background_video_path: String,

    // Panel styling
    pub sidebar_opacity: f64,
    pub sidebar_blur: f64,
    pub content_opacity: f64,
    pub content_blur: f64,

    // Backend-owned storage location
    #[serde(rename = "cacheDir")]
    pub cache_directory: String,

    // Name of the active profile (usually a game name)
    #[serde(rename = "currentConfigName")]
    pub active_profile_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            background_mode: BackgroundMode::Image,
            background_image_path: "/background.png".to_string(),
            background_video_path: "/background.webm".to_string(),
            // Low defaults keep the dark theme see-through
            sidebar_opacity: 0.3,
            sidebar_blur: 20.0,
            content_opacity: 0.2,
            content_blur: 3.0,
            cache_directory: String::new(),
            active_profile_name: "Default".to_string(),
        }
    }
}
