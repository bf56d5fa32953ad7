use thiserror::Error;

use vtcat_core::Platform;

/// Transport-level failures shared by every outbound call.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON encoding error for {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("token exchange failed: {0}")]
    Token(String),
}

impl PlatformError {
    pub(crate) fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Why one platform could not be resolved for one creator.
///
/// Every variant is recoverable: the caller drops the platform and moves on.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("{0} is not configured")]
    NotConfigured(Platform),

    #[error("unrecognized {platform} URL: {url}")]
    UnrecognizedUrl { platform: Platform, url: String },

    #[error("{platform} returned no content for {url}")]
    EmptyResponse { platform: Platform, url: String },

    #[error("{platform} has no channel for {lookup}")]
    NotFound { platform: Platform, lookup: String },

    #[error("{platform} API error: {message}")]
    Api { platform: Platform, message: String },

    #[error(transparent)]
    Transport(#[from] PlatformError),
}
