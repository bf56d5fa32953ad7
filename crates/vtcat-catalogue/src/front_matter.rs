//! Per-creator front-matter document (`index.md`).

use serde::{Deserialize, Serialize};

use vtcat_core::{ChannelInfo, CreatorProfile};

use crate::error::CatalogueError;
use crate::sanitize::sanitize_text;

const LAYOUT: &str = "profile";
const FENCE: &str = "---\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatterChannel {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Only resolved platforms get a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub layout: String,
    pub vtuber_id: String,
    pub vtuber_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vk: Option<FrontMatterChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch: Option<FrontMatterChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<FrontMatterChannel>,
}

impl FrontMatter {
    /// Builds the document for `profile`. Descriptions are expected to be
    /// sanitized already; names are sanitized here.
    #[must_use]
    pub fn from_profile(profile: &CreatorProfile) -> Self {
        let block = |info: &ChannelInfo| FrontMatterChannel {
            name: sanitize_text(&info.name),
            url: info.url.clone(),
            description: info.description.clone(),
        };
        Self {
            layout: LAYOUT.to_string(),
            vtuber_id: profile.id.to_string(),
            vtuber_name: sanitize_text(&profile.name),
            vk: profile.vk.as_ref().map(block),
            twitch: profile.twitch.as_ref().map(block),
            youtube: profile.youtube.as_ref().map(block),
        }
    }

    /// Renders the YAML block between `---` fences.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::FrontMatter`] if YAML serialization fails.
    pub fn render(&self) -> Result<String, CatalogueError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("{FENCE}{yaml}{FENCE}"))
    }

    /// Parses a document produced by [`FrontMatter::render`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::FrontMatter`] if the YAML between the fences
    /// does not parse.
    pub fn parse(document: &str) -> Result<Self, CatalogueError> {
        let body = document.strip_prefix(FENCE).unwrap_or(document);
        let body = body.strip_suffix(FENCE).unwrap_or(body);
        Ok(serde_yaml::from_str(body)?)
    }
}
