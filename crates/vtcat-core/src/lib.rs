pub mod app_config;
pub mod config;
pub mod creator;
pub mod json;

pub use app_config::{AppConfig, Endpoints, TwitchCredentials};
pub use config::{load_app_config, load_app_config_from_env, log_level_from_env};
pub use creator::{ChannelInfo, CreatorId, CreatorProfile, CreatorRow, Platform};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error(
        "environment is not configured: set GS_URL and at least one of YT_API_KEY, \
         TWITCH_CLIENT_ID/TWITCH_CLIENT_SECRET, VK_SERVICE_TOKEN"
    )]
    NoCredentials,
}

#[derive(Debug, Error)]
#[error("unknown platform tag: {0:?}")]
pub struct UnknownPlatform(pub String);
