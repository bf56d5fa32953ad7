//! Data API response shapes. Only the fields the catalogue uses are modeled.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Channel {
    pub snippet: Snippet,
    #[serde(default)]
    pub branding_settings: Option<BrandingSettings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Snippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    pub small: Option<Thumbnail>,
}

impl Thumbnails {
    /// Largest available avatar: `high`, then `medium`, then `default`.
    pub fn best(&self) -> Option<&str> {
        [&self.high, &self.medium, &self.small]
            .into_iter()
            .flatten()
            .map(|t| t.url.as_str())
            .find(|url| !url.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BrandingSettings {
    #[serde(default)]
    pub image: Option<BrandingImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandingImage {
    pub banner_external_url: Option<String>,
}

impl Channel {
    pub fn banner_url(&self) -> Option<&str> {
        self.branding_settings
            .as_ref()
            .and_then(|b| b.image.as_ref())
            .and_then(|i| i.banner_external_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Playlist {
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistSnippet {
    pub channel_id: String,
}
