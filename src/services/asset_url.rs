// Asset URLs
// Turns backend filesystem paths into URLs the web view can load directly

/// Converts a filesystem path into a display URL
pub trait AssetResolver: Send + Sync {
    fn to_asset_url(&self, path: &str) -> String;
}

/// The web view's asset protocol, in the same shape `convertFileSrc` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetProtocol {
    /// `asset://localhost/<path>` (macOS, Linux)
    Asset,
    /// `http://asset.localhost/<path>` (Windows, Android)
    Http,
}

impl AssetProtocol {
    pub fn for_current_platform() -> Self {
        if cfg!(any(windows, target_os = "android")) {
            AssetProtocol::Http
        } else {
            AssetProtocol::Asset
        }
    }

    fn base(&self) -> &'static str {
        match self {
            AssetProtocol::Asset => "asset://localhost/",
            AssetProtocol::Http => "http://asset.localhost/",
        }
    }
}

impl AssetResolver for AssetProtocol {
    fn to_asset_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        format!("{}{}", self.base(), urlencoding::encode(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_scheme() {
        let url = AssetProtocol::Asset.to_asset_url("/home/me/Games/GI/Background.png");
        assert_eq!(url, "asset://localhost/%2Fhome%2Fme%2FGames%2FGI%2FBackground.png");
    }

    #[test]
    fn test_http_scheme_encodes_drive_and_spaces() {
        let url = AssetProtocol::Http.to_asset_url("C:/My Games/Icon.png");
        assert_eq!(url, "http://asset.localhost/C%3A%2FMy%20Games%2FIcon.png");
    }

    #[test]
    fn test_empty_path_stays_empty() {
        assert_eq!(AssetProtocol::Asset.to_asset_url(""), "");
    }
}
