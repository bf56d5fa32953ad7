//! Video-platform client.
//!
//! Resolution archives the channel's Atom activity feed, then pulls channel
//! metadata (title, description, avatar, banner) from the Data API.

mod feed;
mod types;
pub mod url;

use reqwest::Client;

use vtcat_core::{ChannelInfo, CreatorId, Platform};

use crate::download::download_image;
use crate::error::ResolutionError;
use crate::http::{endpoint_url, parse_json, send_for_bytes};
use crate::store::CreatorDir;

use self::types::{ChannelListResponse, PlaylistListResponse};
use self::url::{parse_entity, Entity, EntityKind};

pub const FEED_FILE: &str = "youtube.xml";

pub struct YoutubeClient {
    http: Client,
    api_key: String,
    feed_base: String,
    api_base: String,
}

impl YoutubeClient {
    #[must_use]
    pub fn new(http: Client, api_key: &str, feed_base: &str, api_base: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_owned(),
            feed_base: feed_base.to_owned(),
            api_base: api_base.to_owned(),
        }
    }

    /// Resolves one channel and writes its files into `dir`.
    ///
    /// The feed is saved before metadata is requested, so a metadata failure
    /// still leaves `youtube.xml` behind.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::UnrecognizedUrl`] if `url` matches no known shape.
    /// - [`ResolutionError::EmptyResponse`] if the feed or metadata body is empty.
    /// - [`ResolutionError::NotFound`] if the Data API returns no channel.
    /// - [`ResolutionError::Transport`] on network, status, decode, or I/O failure.
    pub async fn resolve(
        &self,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        let entity = parse_entity(url).ok_or_else(|| ResolutionError::UnrecognizedUrl {
            platform: Platform::Youtube,
            url: url.to_string(),
        })?;

        self.archive_feed(&entity, dir).await?;

        let (param, value) = self.channel_lookup(&entity).await?;
        let mut api_url = endpoint_url(&self.api_base, "channels")?;
        api_url
            .query_pairs_mut()
            .append_pair("part", "snippet,brandingSettings")
            .append_pair(param, &value)
            .append_pair("key", &self.api_key);

        let body = send_for_bytes(self.http.get(api_url)).await?;
        if body.is_empty() {
            return Err(ResolutionError::EmptyResponse {
                platform: Platform::Youtube,
                url: url.to_string(),
            });
        }
        dir.write(&Platform::Youtube.payload_file(), &body).await?;

        let parsed: ChannelListResponse = parse_json(&body, "youtube channels")?;
        let channel = parsed
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionError::NotFound {
                platform: Platform::Youtube,
                lookup: value.clone(),
            })?;

        let icon = match channel.snippet.thumbnails.best() {
            Some(src) => {
                download_image(&self.http, src, dir, &Platform::Youtube.icon_file()).await
            }
            None => false,
        };
        let cover = match channel.banner_url() {
            Some(src) => {
                download_image(&self.http, src, dir, &Platform::Youtube.cover_file()).await
            }
            None => false,
        };

        Ok(ChannelInfo {
            id: id.clone(),
            name: channel.snippet.title,
            description: channel.snippet.description,
            url: url.to_string(),
            icon,
            cover,
        })
    }

    async fn archive_feed(&self, entity: &Entity, dir: &CreatorDir) -> Result<(), ResolutionError> {
        let mut feed_url = endpoint_url(&self.feed_base, "")?;
        feed_url
            .query_pairs_mut()
            .append_pair(entity.kind.feed_param(), &entity.id);

        let body = send_for_bytes(self.http.get(feed_url.clone())).await?;
        if body.is_empty() {
            return Err(ResolutionError::EmptyResponse {
                platform: Platform::Youtube,
                url: feed_url.to_string(),
            });
        }
        dir.write(FEED_FILE, &body).await?;

        match feed::count_entries(&String::from_utf8_lossy(&body)) {
            Ok(entries) => tracing::debug!(feed = %feed_url, entries, "archived activity feed"),
            Err(e) => {
                tracing::warn!(feed = %feed_url, error = %e, "activity feed is not valid XML");
            }
        }
        Ok(())
    }

    /// Query parameter and value that select the channel in the Data API.
    ///
    /// Playlists are not channels, so their owning channel is looked up first.
    async fn channel_lookup(
        &self,
        entity: &Entity,
    ) -> Result<(&'static str, String), ResolutionError> {
        match entity.kind {
            EntityKind::Channel => Ok(("id", entity.id.clone())),
            EntityKind::User => Ok(("forUsername", entity.id.clone())),
            EntityKind::Playlist => {
                let mut api_url = endpoint_url(&self.api_base, "playlists")?;
                api_url
                    .query_pairs_mut()
                    .append_pair("part", "snippet")
                    .append_pair("id", &entity.id)
                    .append_pair("key", &self.api_key);

                let body = send_for_bytes(self.http.get(api_url)).await?;
                let parsed: PlaylistListResponse = parse_json(&body, "youtube playlists")?;
                parsed
                    .items
                    .into_iter()
                    .next()
                    .map(|p| ("id", p.snippet.channel_id))
                    .ok_or_else(|| ResolutionError::NotFound {
                        platform: Platform::Youtube,
                        lookup: entity.id.clone(),
                    })
            }
        }
    }
}
