//! Shared `reqwest` plumbing for the platform clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::PlatformError;

/// Builds the HTTP client shared by every platform client.
///
/// # Errors
///
/// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed (e.g., invalid TLS config).
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlatformError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Sends `request` and returns the body bytes of a 2xx response.
///
/// The body may be empty; callers decide whether that counts as a failure.
pub(crate) async fn send_for_bytes(request: RequestBuilder) -> Result<Vec<u8>, PlatformError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PlatformError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    body: &[u8],
    context: &str,
) -> Result<T, PlatformError> {
    serde_json::from_slice(body).map_err(|e| PlatformError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Parses `base` and appends `segment` as a path, keeping any existing path.
pub(crate) fn endpoint_url(base: &str, segment: &str) -> Result<reqwest::Url, PlatformError> {
    let joined = if segment.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), segment)
    };
    reqwest::Url::parse(&joined).map_err(|e| PlatformError::invalid_url(&joined, e))
}
