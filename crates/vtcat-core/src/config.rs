use crate::app_config::{AppConfig, Endpoints, TwitchCredentials};
use crate::ConfigError;

/// Variables whose joint absence means the environment was never set up.
const DEFAULT_LOG_LEVEL: &str = "info";

const CREDENTIAL_VARS: [&str; 6] = [
    "GS_URL",
    "YT_API_KEY",
    "TWITCH_CLIENT_ID",
    "TWITCH_CLIENT_SECRET",
    "VK_SERVICE_TOKEN",
    "VK_CLIENT_ID",
];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if no credentials are configured or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if no credentials are configured or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Log level from `VTCAT_LOG_LEVEL`, `info` when unset or blank.
///
/// Needs no credentials, so commands that never load the full configuration
/// still honour the configured level.
#[must_use]
pub fn log_level_from_env() -> String {
    log_level(|key| std::env::var(key))
}

fn log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("VTCAT_LOG_LEVEL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // Blank values count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    if CREDENTIAL_VARS.into_iter().all(|var| optional(var).is_none()) {
        return Err(ConfigError::NoCredentials);
    }

    let twitch = match (optional("TWITCH_CLIENT_ID"), optional("TWITCH_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(TwitchCredentials {
            client_id,
            client_secret,
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "TWITCH_CLIENT_SECRET".to_string(),
                reason: "must be set together with TWITCH_CLIENT_ID".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "TWITCH_CLIENT_ID".to_string(),
                reason: "must be set together with TWITCH_CLIENT_SECRET".to_string(),
            })
        }
    };

    let defaults = Endpoints::default();
    let endpoints = Endpoints {
        youtube_feed: or_default("VTCAT_YOUTUBE_FEED_BASE", &defaults.youtube_feed),
        youtube_api: or_default("VTCAT_YOUTUBE_API_BASE", &defaults.youtube_api),
        twitch_api: or_default("VTCAT_TWITCH_API_BASE", &defaults.twitch_api),
        twitch_auth: or_default("VTCAT_TWITCH_AUTH_BASE", &defaults.twitch_auth),
        vk_api: or_default("VTCAT_VK_API_BASE", &defaults.vk_api),
        vk_api_version: or_default("VTCAT_VK_API_VERSION", &defaults.vk_api_version),
    };

    Ok(AppConfig {
        sheet_url: optional("GS_URL"),
        youtube_api_key: optional("YT_API_KEY"),
        twitch,
        vk_service_token: optional("VK_SERVICE_TOKEN"),
        vk_client_id: optional("VK_CLIENT_ID"),
        creators_dir: PathBuf::from(or_default("VTCAT_CREATORS_DIR", "./vtubers")),
        site_data_path: PathBuf::from(or_default(
            "VTCAT_SITE_DATA_PATH",
            "./_data/vtubers.json",
        )),
        log_level: log_level(&lookup),
        request_timeout_secs: parse_u64("VTCAT_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: or_default("VTCAT_USER_AGENT", "vtcat/0.1 (creator-catalogue)"),
        vk_error_pause_ms: parse_u64("VTCAT_VK_ERROR_PAUSE_MS", "1000")?,
        endpoints,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
