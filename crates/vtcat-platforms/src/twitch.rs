//! Streaming-platform client.
//!
//! Uses an app access token from the client-credentials grant, fetched once
//! when the client is built and reused for every lookup.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use vtcat_core::json::to_embeddable_vec;
use vtcat_core::{ChannelInfo, CreatorId, Platform, TwitchCredentials};

use crate::download::download_image;
use crate::error::{PlatformError, ResolutionError};
use crate::http::{endpoint_url, parse_json, send_for_bytes};
use crate::store::CreatorDir;

static LOGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.|m\.)?twitch\.tv/([^/?#]+)").expect("valid login regex")
});

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TwitchUser {
    login: String,
    display_name: String,
    description: String,
    profile_image_url: Option<String>,
    offline_image_url: Option<String>,
}

/// Extracts the login from a channel URL such as `https://www.twitch.tv/alice`.
#[must_use]
pub fn parse_login(url: &str) -> Option<String> {
    LOGIN_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Exchanges app credentials for an access token.
///
/// # Errors
///
/// Returns [`PlatformError`] on network failure, a non-2xx status, or a
/// response without an `access_token`.
pub async fn fetch_app_token(
    http: &Client,
    auth_base: &str,
    credentials: &TwitchCredentials,
) -> Result<String, PlatformError> {
    let url = endpoint_url(auth_base, "token")?;
    let form = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("grant_type", "client_credentials"),
    ];
    let body = send_for_bytes(http.post(url).form(&form)).await?;
    let parsed: TokenResponse = parse_json(&body, "twitch token")?;
    if parsed.access_token.is_empty() {
        return Err(PlatformError::Token("empty access_token".to_string()));
    }
    Ok(parsed.access_token)
}

pub struct TwitchClient {
    http: Client,
    client_id: String,
    token: String,
    api_base: String,
}

impl TwitchClient {
    /// Fetches an app token and builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the token exchange fails.
    pub async fn connect(
        http: Client,
        credentials: &TwitchCredentials,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, PlatformError> {
        let token = fetch_app_token(&http, auth_base, credentials).await?;
        Ok(Self::with_token(http, &credentials.client_id, &token, api_base))
    }

    #[must_use]
    pub fn with_token(http: Client, client_id: &str, token: &str, api_base: &str) -> Self {
        Self {
            http,
            client_id: client_id.to_owned(),
            token: token.to_owned(),
            api_base: api_base.to_owned(),
        }
    }

    /// Looks up the channel owner and writes `twitch.json` plus images into `dir`.
    ///
    /// The `email` field is removed before the payload is saved.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::UnrecognizedUrl`] if no login can be extracted.
    /// - [`ResolutionError::NotFound`] if the API returns an empty `data` array.
    /// - [`ResolutionError::Transport`] on network, status, decode, or I/O failure.
    pub async fn resolve(
        &self,
        id: &CreatorId,
        url: &str,
        dir: &CreatorDir,
    ) -> Result<ChannelInfo, ResolutionError> {
        let login = parse_login(url).ok_or_else(|| ResolutionError::UnrecognizedUrl {
            platform: Platform::Twitch,
            url: url.to_string(),
        })?;

        let mut api_url = endpoint_url(&self.api_base, "users")?;
        api_url.query_pairs_mut().append_pair("login", &login);

        let request = self
            .http
            .get(api_url)
            .bearer_auth(&self.token)
            .header("Client-Id", &self.client_id);
        let body = send_for_bytes(request).await?;
        let envelope: UsersResponse = parse_json(&body, "twitch users")?;

        let mut user = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionError::NotFound {
                platform: Platform::Twitch,
                lookup: login.clone(),
            })?;
        if let Some(fields) = user.as_object_mut() {
            fields.remove("email");
        }

        let payload = to_embeddable_vec(&user).map_err(|e| PlatformError::Encode {
            context: "twitch user".to_string(),
            source: e,
        })?;
        dir.write(&Platform::Twitch.payload_file(), &payload).await?;

        let user: TwitchUser = serde_json::from_value(user).map_err(|e| {
            PlatformError::Deserialize {
                context: "twitch user".to_string(),
                source: e,
            }
        })?;

        let icon = match non_empty(user.profile_image_url.as_deref()) {
            Some(src) => download_image(&self.http, src, dir, &Platform::Twitch.icon_file()).await,
            None => false,
        };
        let cover = match non_empty(user.offline_image_url.as_deref()) {
            Some(src) => {
                download_image(&self.http, src, dir, &Platform::Twitch.cover_file()).await
            }
            None => false,
        };

        let name = if user.display_name.is_empty() {
            login
        } else {
            user.display_name
        };

        Ok(ChannelInfo {
            id: id.clone(),
            name,
            description: user.description,
            url: url.to_string(),
            icon,
            cover,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
