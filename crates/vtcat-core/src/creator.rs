//! Creator records as read from the spreadsheet feed and as published in the
//! catalogue index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownPlatform;

/// Stable creator identifier: lowercase hex MD5 of the display name.
///
/// The same name always yields the same id, so per-creator directories and
/// catalogue entries survive across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatorId(String);

impl CreatorId {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(format!("{:x}", md5::compute(name.as_bytes())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CreatorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One of the three supported external services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Twitch,
    Vk,
}

impl Platform {
    /// Main-image fallback order.
    pub const ALL: [Platform; 3] = [Platform::Youtube, Platform::Twitch, Platform::Vk];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Twitch => "twitch",
            Platform::Vk => "vk",
        }
    }

    /// File name of the downloaded avatar, e.g. `twitch_icon.jpg`.
    #[must_use]
    pub fn icon_file(self) -> String {
        format!("{}_icon.jpg", self.as_str())
    }

    #[must_use]
    pub fn cover_file(self) -> String {
        format!("{}_cover.jpg", self.as_str())
    }

    /// File name of the raw metadata payload.
    #[must_use]
    pub fn payload_file(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "twitch" => Ok(Platform::Twitch),
            "vk" => Ok(Platform::Vk),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// One row of the spreadsheet feed.
///
/// Columns: name, name variant, video URL, streaming URL, social URL,
/// two unused columns, preferred platform tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatorRow {
    pub name: String,
    pub name_variant: String,
    pub youtube_url: String,
    pub twitch_url: String,
    pub vk_url: String,
    pub preferred_platform: String,
}

impl CreatorRow {
    /// Builds a row from positional cells. Missing cells read as empty.
    #[must_use]
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |idx: usize| {
            cells
                .get(idx)
                .map(|c| c.as_ref().to_string())
                .unwrap_or_default()
        };
        Self {
            name: cell(0),
            name_variant: cell(1),
            youtube_url: cell(2),
            twitch_url: cell(3),
            vk_url: cell(4),
            preferred_platform: cell(7),
        }
    }

    #[must_use]
    pub fn id(&self) -> CreatorId {
        CreatorId::from_name(&self.name)
    }

    /// Trimmed profile URL for `platform`, or `None` when the cell is blank.
    #[must_use]
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        let raw = match platform {
            Platform::Youtube => &self.youtube_url,
            Platform::Twitch => &self.twitch_url,
            Platform::Vk => &self.vk_url,
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Platforms with a non-blank URL cell, in fallback order.
    #[must_use]
    pub fn configured_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.url_for(*p).is_some())
            .collect()
    }

    /// Trimmed preferred-platform tag, or `None` when blank.
    #[must_use]
    pub fn preferred_tag(&self) -> Option<&str> {
        let trimmed = self.preferred_platform.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// One platform's resolved state for one creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: CreatorId,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon: bool,
    pub cover: bool,
}

/// A catalogue entry: up to three resolved channels under one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub id: CreatorId,
    pub name: String,
    pub name_variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<ChannelInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch: Option<ChannelInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vk: Option<ChannelInfo>,
}

impl CreatorProfile {
    #[must_use]
    pub fn new(row: &CreatorRow) -> Self {
        Self {
            id: row.id(),
            name: row.name.clone(),
            name_variant: row.name_variant.clone(),
            youtube: None,
            twitch: None,
            vk: None,
        }
    }

    #[must_use]
    pub fn channel(&self, platform: Platform) -> Option<&ChannelInfo> {
        match platform {
            Platform::Youtube => self.youtube.as_ref(),
            Platform::Twitch => self.twitch.as_ref(),
            Platform::Vk => self.vk.as_ref(),
        }
    }

    pub fn set_channel(&mut self, platform: Platform, info: ChannelInfo) {
        let slot = match platform {
            Platform::Youtube => &mut self.youtube,
            Platform::Twitch => &mut self.twitch,
            Platform::Vk => &mut self.vk,
        };
        *slot = Some(info);
    }

    /// Resolved channels in fallback order.
    pub fn channels(&self) -> impl Iterator<Item = (Platform, &ChannelInfo)> {
        Platform::ALL
            .into_iter()
            .filter_map(|p| self.channel(p).map(|c| (p, c)))
    }

    #[must_use]
    pub fn has_any_channel(&self) -> bool {
        self.channels().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> CreatorRow {
        CreatorRow::from_cells(cells)
    }

    #[test]
    fn creator_id_is_md5_hex_of_name() {
        assert_eq!(
            CreatorId::from_name("Alice").as_str(),
            "64489c85dc2fe0787b85cd87214b3810"
        );
        assert_eq!(CreatorId::from_name("Alice"), CreatorId::from_name("Alice"));
        assert_ne!(CreatorId::from_name("Alice"), CreatorId::from_name("alice"));
    }

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("YouTube".parse::<Platform>().unwrap(), Platform::Youtube);
        assert_eq!(" twitch ".parse::<Platform>().unwrap(), Platform::Twitch);
        assert_eq!("vk".parse::<Platform>().unwrap(), Platform::Vk);
        assert!("trovo".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_file_names() {
        assert_eq!(Platform::Youtube.icon_file(), "youtube_icon.jpg");
        assert_eq!(Platform::Twitch.cover_file(), "twitch_cover.jpg");
        assert_eq!(Platform::Vk.payload_file(), "vk.json");
    }

    #[test]
    fn row_reads_positional_cells() {
        let r = row(&[
            "Alice",
            "アリス",
            "https://www.youtube.com/channel/UC123",
            "",
            " https://vk.com/alice ",
            "",
            "",
            "vk",
        ]);
        assert_eq!(r.name, "Alice");
        assert_eq!(r.name_variant, "アリス");
        assert_eq!(
            r.url_for(Platform::Youtube),
            Some("https://www.youtube.com/channel/UC123")
        );
        assert_eq!(r.url_for(Platform::Twitch), None);
        assert_eq!(r.url_for(Platform::Vk), Some("https://vk.com/alice"));
        assert_eq!(r.preferred_tag(), Some("vk"));
        assert_eq!(
            r.configured_platforms(),
            vec![Platform::Youtube, Platform::Vk]
        );
    }

    #[test]
    fn short_row_fills_missing_cells_with_empty() {
        let r = row(&["Bob", "", "   "]);
        assert_eq!(r.url_for(Platform::Youtube), None);
        assert!(r.configured_platforms().is_empty());
        assert_eq!(r.preferred_tag(), None);
    }

    #[test]
    fn profile_serializes_only_resolved_platforms() {
        let r = row(&["Alice", "アリス"]);
        let mut profile = CreatorProfile::new(&r);
        assert!(!profile.has_any_channel());
        profile.set_channel(
            Platform::Twitch,
            ChannelInfo {
                id: r.id(),
                name: "alice".to_string(),
                description: "hi".to_string(),
                url: "https://www.twitch.tv/alice".to_string(),
                icon: true,
                cover: false,
            },
        );
        assert!(profile.has_any_channel());

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("twitch").is_some());
        assert!(json.get("youtube").is_none());
        assert!(json.get("vk").is_none());
        assert_eq!(json["twitch"]["icon"], serde_json::json!(true));
        assert_eq!(json["name_variant"], serde_json::json!("アリス"));
    }
}
