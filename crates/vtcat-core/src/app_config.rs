use std::path::PathBuf;

pub const DEFAULT_YOUTUBE_FEED_BASE: &str = "https://www.youtube.com/feeds/videos.xml";
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TWITCH_API_BASE: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_TWITCH_AUTH_BASE: &str = "https://id.twitch.tv/oauth2";
pub const DEFAULT_VK_API_BASE: &str = "https://api.vk.com/method";
pub const DEFAULT_VK_API_VERSION: &str = "5.131";

/// App credentials for the client-credentials token exchange.
#[derive(Clone)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for TwitchCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Base URLs of every external API the build talks to.
///
/// Production values are the defaults; tests point them at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub youtube_feed: String,
    pub youtube_api: String,
    pub twitch_api: String,
    pub twitch_auth: String,
    pub vk_api: String,
    pub vk_api_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            youtube_feed: DEFAULT_YOUTUBE_FEED_BASE.to_string(),
            youtube_api: DEFAULT_YOUTUBE_API_BASE.to_string(),
            twitch_api: DEFAULT_TWITCH_API_BASE.to_string(),
            twitch_auth: DEFAULT_TWITCH_AUTH_BASE.to_string(),
            vk_api: DEFAULT_VK_API_BASE.to_string(),
            vk_api_version: DEFAULT_VK_API_VERSION.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at one base URL, keeping the production path
    /// layout underneath it.
    #[must_use]
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            youtube_feed: format!("{base}/feeds/videos.xml"),
            youtube_api: format!("{base}/youtube/v3"),
            twitch_api: format!("{base}/helix"),
            twitch_auth: format!("{base}/oauth2"),
            vk_api: format!("{base}/method"),
            vk_api_version: DEFAULT_VK_API_VERSION.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub sheet_url: Option<String>,
    pub youtube_api_key: Option<String>,
    pub twitch: Option<TwitchCredentials>,
    pub vk_service_token: Option<String>,
    pub vk_client_id: Option<String>,
    pub creators_dir: PathBuf,
    pub site_data_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub vk_error_pause_ms: u64,
    pub endpoints: Endpoints,
}

impl AppConfig {
    /// Path of the working copy of the catalogue index.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.creators_dir.join("index.json")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("sheet_url", &self.sheet_url)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("twitch", &self.twitch)
            .field(
                "vk_service_token",
                &self.vk_service_token.as_ref().map(|_| "[redacted]"),
            )
            .field("vk_client_id", &self.vk_client_id)
            .field("creators_dir", &self.creators_dir)
            .field("site_data_path", &self.site_data_path)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("vk_error_pause_ms", &self.vk_error_pause_ms)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
