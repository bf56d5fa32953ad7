//! Uniform dispatch over the three platform clients.

use std::time::Duration;

use reqwest::Client;

use vtcat_core::{AppConfig, ChannelInfo, CreatorId, Platform};

use crate::error::ResolutionError;
use crate::store::CreatorDir;
use crate::twitch::TwitchClient;
use crate::vk::VkClient;
use crate::youtube::YoutubeClient;

pub enum PlatformClient {
    Youtube(YoutubeClient),
    Twitch(TwitchClient),
    Vk(VkClient),
}

impl PlatformClient {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            PlatformClient::Youtube(_) => Platform::Youtube,
            PlatformClient::Twitch(_) => Platform::Twitch,
            PlatformClient::Vk(_) => Platform::Vk,
        }
    }

    /// Resolves `url` for the creator `id`, writing raw payloads and images
    /// into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the platform's [`ResolutionError`]; see each client.
    pub async fn resolve(
        &self,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        match self {
            PlatformClient::Youtube(c) => c.resolve(id, url, dir).await,
            PlatformClient::Twitch(c) => c.resolve(id, url, dir).await,
            PlatformClient::Vk(c) => c.resolve(id, url, dir).await,
        }
    }
}

/// The set of clients available for a run. A platform without credentials
/// has no client, and every lookup for it fails with `NotConfigured`.
#[derive(Default)]
pub struct PlatformClients {
    clients: Vec<PlatformClient>,
}

impl PlatformClients {
    #[must_use]
    pub fn new(clients: Vec<PlatformClient>) -> Self {
        Self { clients }
    }

    /// Builds one client per configured platform.
    ///
    /// The streaming-platform token is exchanged here, once per run. If the
    /// exchange fails the platform is left unconfigured and the run goes on.
    pub async fn from_config(config: &AppConfig, http: &Client) -> Self {
        let endpoints = &config.endpoints;
        let mut clients = Vec::new();

        if let Some(key) = &config.youtube_api_key {
            clients.push(PlatformClient::Youtube(YoutubeClient::new(
                http.clone(),
                key,
                &endpoints.youtube_feed,
                &endpoints.youtube_api,
            )));
        }

        if let Some(credentials) = &config.twitch {
            match TwitchClient::connect(
                http.clone(),
                credentials,
                &endpoints.twitch_auth,
                &endpoints.twitch_api,
            )
            .await
            {
                Ok(client) => clients.push(PlatformClient::Twitch(client)),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "twitch token exchange failed; twitch lookups disabled"
                    );
                }
            }
        }

        if let Some(token) = &config.vk_service_token {
            clients.push(PlatformClient::Vk(VkClient::new(
                http.clone(),
                token,
                &endpoints.vk_api,
                &endpoints.vk_api_version,
                Duration::from_millis(config.vk_error_pause_ms),
            )));
        }

        Self { clients }
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&PlatformClient> {
        self.clients.iter().find(|c| c.platform() == platform)
    }

    #[must_use]
    pub fn configured(&self) -> Vec<Platform> {
        self.clients.iter().map(PlatformClient::platform).collect()
    }

    /// # Errors
    ///
    /// Returns [`ResolutionError::NotConfigured`] when `platform` has no
    /// client, otherwise whatever the client returns.
    pub async fn resolve(
        &self,
        platform: Platform,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        match self.get(platform) {
            Some(client) => client.resolve(id, url, dir).await,
            None => Err(ResolutionError::NotConfigured(platform)),
        }
    }
}
