//! Social-network client.
//!
//! Any failure is logged and followed by a short pause before the error is
//! handed back, which keeps a run from hammering the API once it starts
//! rejecting calls. There is no retry.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use vtcat_core::json::to_embeddable_vec;
use vtcat_core::{ChannelInfo, CreatorId, Platform};

use crate::download::download_image;
use crate::error::{PlatformError, ResolutionError};
use crate::http::{endpoint_url, parse_json, send_for_bytes};
use crate::store::CreatorDir;

static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.|m\.)?vk\.com/([^/?#]+)").expect("valid group regex")
});

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VkGroup {
    name: String,
    description: String,
    photo_50: Option<String>,
    photo_100: Option<String>,
    photo_200: Option<String>,
    cover: Option<VkCover>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VkCover {
    images: Vec<VkImage>,
}

#[derive(Debug, Deserialize)]
struct VkImage {
    url: String,
}

impl VkGroup {
    /// Largest avatar among the three fixed sizes.
    fn avatar_url(&self) -> Option<&str> {
        [&self.photo_200, &self.photo_100, &self.photo_50]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    /// The cover variants are ordered by size; the last one is the largest.
    fn cover_url(&self) -> Option<&str> {
        self.cover
            .as_ref()
            .and_then(|c| c.images.last())
            .map(|i| i.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Extracts the group id or short name from `https://vk.com/<group>`.
#[must_use]
pub fn parse_group_id(url: &str) -> Option<String> {
    GROUP_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub struct VkClient {
    http: Client,
    token: String,
    api_base: String,
    api_version: String,
    error_pause: Duration,
}

impl VkClient {
    #[must_use]
    pub fn new(
        http: Client,
        token: &str,
        api_base: &str,
        api_version: &str,
        error_pause: Duration,
    ) -> Self {
        Self {
            http,
            token: token.to_owned(),
            api_base: api_base.to_owned(),
            api_version: api_version.to_owned(),
            error_pause,
        }
    }

    /// Looks up the group and writes `vk.json` plus images into `dir`.
    ///
    /// # Errors
    ///
    /// Every failure is returned after the configured pause:
    /// - [`ResolutionError::UnrecognizedUrl`] if no group id can be extracted.
    /// - [`ResolutionError::Api`] if the API answers with an error envelope.
    /// - [`ResolutionError::NotFound`] if the response holds no group.
    /// - [`ResolutionError::Transport`] on network, status, decode, or I/O failure.
    pub async fn resolve(
        &self,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        match self.fetch_group(id, url, dir).await {
            Ok(info) => Ok(info),
            Err(e) => {
                tracing::warn!(creator = %id, url, error = %e, "vk lookup failed");
                tokio::time::sleep(self.error_pause).await;
                Err(e)
            }
        }
    }

    async fn fetch_group(
        &self,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        let group_id = parse_group_id(url).ok_or_else(|| ResolutionError::UnrecognizedUrl {
            platform: Platform::Vk,
            url: url.to_string(),
        })?;

        let mut api_url = endpoint_url(&self.api_base, "groups.getById")?;
        api_url
            .query_pairs_mut()
            .append_pair("group_id", &group_id)
            .append_pair("fields", "cover,description")
            .append_pair("access_token", &self.token)
            .append_pair("v", &self.api_version);

        let body = send_for_bytes(self.http.get(api_url)).await?;
        let envelope: Value = parse_json(&body, "vk groups.getById")?;
        let group = first_group(envelope, &group_id)?;

        let payload = to_embeddable_vec(&group).map_err(|e| PlatformError::Encode {
            context: "vk group".to_string(),
            source: e,
        })?;
        dir.write(&Platform::Vk.payload_file(), &payload).await?;

        let group: VkGroup =
            serde_json::from_value(group).map_err(|e| PlatformError::Deserialize {
                context: "vk group".to_string(),
                source: e,
            })?;

        let icon = match group.avatar_url() {
            Some(src) => download_image(&self.http, src, dir, &Platform::Vk.icon_file()).await,
            None => false,
        };
        let cover = match group.cover_url() {
            Some(src) => download_image(&self.http, src, dir, &Platform::Vk.cover_file()).await,
            None => false,
        };

        Ok(ChannelInfo {
            id: id.clone(),
            name: group.name,
            description: group.description,
            url: url.to_string(),
            icon,
            cover,
        })
    }
}

/// Unwraps the `groups.getById` envelope.
///
/// Older API versions answer `{"response": [group]}`, newer ones
/// `{"response": {"groups": [group]}}`; failures carry `{"error": {...}}`.
fn first_group(envelope: Value, group_id: &str) -> Result<Value, ResolutionError> {
    if let Some(error) = envelope.get("error") {
        let message = error
            .get("error_msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ResolutionError::Api {
            platform: Platform::Vk,
            message,
        });
    }

    let groups = match envelope.get("response") {
        Some(Value::Array(groups)) => Some(groups),
        Some(Value::Object(obj)) => obj.get("groups").and_then(Value::as_array),
        _ => None,
    };

    groups
        .and_then(|g| g.first())
        .cloned()
        .ok_or_else(|| ResolutionError::NotFound {
            platform: Platform::Vk,
            lookup: group_id.to_string(),
        })
}
