// Game Model
// Scanned game entries as the backend reports them and as the view renders them

use serde::{Deserialize, Serialize};
use crate::services::AssetResolver;

/// A game as reported by `scan_games`.
///
/// This is the compatibility shim for the two field-naming conventions the
/// backend has used: current camelCase (`iconPath`, `bgPath`, `bgVideoPath`,
/// `showSidebar`) and the older snake_case (`icon_path`, `bg_path`,
/// `bg_video_path`, `show_sidebar`). Nothing past this type should care which
/// one arrived. Serialization always writes the camelCase names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntryRaw {
    pub name: String,

    #[serde(default, alias = "icon_path")]
    pub icon_path: String,

    #[serde(default, rename = "bgPath", alias = "bg_path")]
    pub background_path: String,

    #[serde(default, rename = "bgVideoPath", alias = "bg_video_path")]
    pub background_video_path: Option<String>,

    #[serde(default, alias = "show_sidebar")]
    pub show_sidebar: bool,
}

/// A render-ready game entry.
///
/// Display URLs are derived once on reload; the raw paths are kept so the
/// selection logic can re-derive URLs without asking the backend again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    /// Display name, also used as the profile name when selected
    pub name: String,

    pub icon_url: String,
    pub background_url: String,
    pub background_video_url: Option<String>,

    pub raw_icon_path: Option<String>,
    pub raw_background_path: Option<String>,
    pub raw_background_video_path: Option<String>,

    /// Sidebar hint from the scan, interpreted by the view
    pub show_sidebar: bool,
}

impl GameEntry {
    /// Normalize a backend entry into display URLs while retaining raw paths
    pub fn from_raw(raw: GameEntryRaw, resolver: &dyn AssetResolver) -> Self {
        let raw_icon_path = non_empty(raw.icon_path);
        let raw_background_path = non_empty(raw.background_path);
        let raw_background_video_path = raw.background_video_path.and_then(non_empty);

        Self {
            name: raw.name,
            icon_url: resolve_or_empty(resolver, raw_icon_path.as_deref()),
            background_url: resolve_or_empty(resolver, raw_background_path.as_deref()),
            background_video_url: raw_background_video_path
                .as_deref()
                .map(|path| resolver.to_asset_url(path)),
            raw_icon_path,
            raw_background_path,
            raw_background_video_path,
            show_sidebar: raw.show_sidebar,
        }
    }
}

fn non_empty(path: String) -> Option<String> {
    if path.trim().is_empty() {
        None
    } else {
        Some(path)
    }
}

fn resolve_or_empty(resolver: &dyn AssetResolver, path: Option<&str>) -> String {
    path.map(|p| resolver.to_asset_url(p)).unwrap_or_default()
}
