// Launcher API
// Looks up and downloads official game backgrounds from the HoYoPlay launcher

use std::path::Path;
use reqwest::{Client, Url};
use serde::Deserialize;
use crate::error::{BackendError, BackendResult};
use crate::models::BackgroundMode;

const GAME_INFO_URL: &str = "https://hyp-api.mihoyo.com/hyp/hyp-connect/api/getAllGameBasicInfo";
const LAUNCHER_ID: &str = "jGHBHlcOq1";
const LANGUAGE: &str = "zh-cn";

/// Launcher game id for a mod-loader preset
pub fn launcher_game_id(preset: &str) -> Option<&'static str> {
    match preset {
        "GIMI" => Some("1Z8W5NHUQb"),
        "HIMI" => Some("osvnlOc0S8"),
        "SRMI" => Some("64kMb5iAWu"),
        "ZZMI" => Some("x6znKlJ0xK"),
        _ => None,
    }
}

#[derive(Deserialize)]
struct GameInfoResponse {
    #[serde(default)]
    retcode: i64,
    #[serde(default)]
    message: String,
    data: Option<GameInfoData>,
}

#[derive(Deserialize)]
struct GameInfoData {
    #[serde(default)]
    game_info_list: Vec<GameInfo>,
}

#[derive(Deserialize)]
struct GameInfo {
    #[serde(default)]
    backgrounds: Vec<LauncherBackground>,
}

#[derive(Deserialize)]
struct LauncherBackground {
    background: Option<LauncherAsset>,
    video: Option<LauncherAsset>,
}

#[derive(Deserialize)]
struct LauncherAsset {
    #[serde(default)]
    url: String,
}

/// Pick the first official background of `mode`'s kind out of a
/// `getAllGameBasicInfo` response body
pub fn parse_background_url(body: &str, mode: BackgroundMode) -> BackendResult<String> {
    let response: GameInfoResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::Parse(format!("Failed to parse launcher response: {e}")))?;

    if response.retcode != 0 {
        return Err(BackendError::Network(format!(
            "Launcher API error {}: {}",
            response.retcode, response.message
        )));
    }

    let data = response
        .data
        .ok_or_else(|| BackendError::Parse("Missing data field".to_string()))?;
    let game = data
        .game_info_list
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::NotFound("Empty game info list".to_string()))?;
    let background = game
        .backgrounds
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::NotFound("Empty backgrounds list".to_string()))?;

    let (asset, kind) = match mode {
        BackgroundMode::Image => (background.background, "image"),
        BackgroundMode::Video => (background.video, "video"),
    };
    asset
        .map(|asset| asset.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| BackendError::NotFound(format!("No {kind} URL found")))
}

/// File extension from the URL path, or the mode's default when it has none
pub fn extension_from_url(url: &str, mode: BackgroundMode) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| {
            Path::new(url.path())
                .extension()
                .and_then(|e| e.to_str())
                .filter(|e| !e.is_empty())
                .map(str::to_lowercase)
        })
        .unwrap_or_else(|| mode.default_extension().to_string())
}

/// HTTP client for the launcher's game info endpoint
#[derive(Clone)]
pub struct LauncherClient {
    client: Client,
    game_info_url: String,
}

impl LauncherClient {
    pub fn new() -> Self {
        Self::with_client(Client::new(), GAME_INFO_URL)
    }

    pub fn with_client(client: Client, game_info_url: impl Into<String>) -> Self {
        Self {
            client,
            game_info_url: game_info_url.into(),
        }
    }

    /// Official background URL for `preset` in the given mode
    pub async fn background_url(&self, preset: &str, mode: BackgroundMode) -> BackendResult<String> {
        let game_id = launcher_game_id(preset).ok_or_else(|| {
            BackendError::InvalidName(format!("Unsupported game preset for auto-update: {preset}"))
        })?;

        let body = self
            .client
            .get(&self.game_info_url)
            .query(&[
                ("launcher_id", LAUNCHER_ID),
                ("language", LANGUAGE),
                ("game_id", game_id),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_background_url(&body, mode)
    }

    pub async fn download(&self, url: &str) -> BackendResult<Vec<u8>> {
        log::info!("Downloading background from: {url}");
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

impl Default for LauncherClient {
    fn default() -> Self {
        Self::new()
    }
}
