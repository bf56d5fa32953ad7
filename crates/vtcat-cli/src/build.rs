//! The `build` command: feed → platform lookups → per-creator files → index.

use anyhow::Context;

use vtcat_catalogue::{build_catalogue, write_index, Aggregator};
use vtcat_core::{AppConfig, ConfigError, CreatorRow, Platform};
use vtcat_platforms::{build_http_client, fetch_rows, PlatformClients};

/// Runs one full catalogue build.
///
/// With `dry_run` the feed is fetched and each row's planned lookups are
/// printed; no platform is contacted and nothing is written.
///
/// # Errors
///
/// Returns an error if the feed URL is unset, the HTTP client cannot be
/// built, the feed cannot be fetched or parsed, or the index cannot be
/// written. Per-creator failures are logged and skipped, not propagated.
pub(crate) async fn run_build(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let sheet_url = config
        .sheet_url
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("GS_URL".to_string()))?;

    let http = build_http_client(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    let rows = fetch_rows(&http, sheet_url)
        .await
        .context("failed to load the creator feed")?;
    tracing::info!(rows = rows.len(), "creator feed loaded");

    if dry_run {
        for line in plan_lines(config, &rows) {
            println!("{line}");
        }
        return Ok(());
    }

    let clients = PlatformClients::from_config(config, &http).await;
    if clients.configured().is_empty() {
        tracing::warn!("no platform client is configured; every creator will be dropped");
    }

    let aggregator = Aggregator::new(&clients, &config.creators_dir);
    let (profiles, summary) = build_catalogue(&rows, &aggregator).await;

    let index_path = config.index_path();
    write_index(&profiles, &[index_path.as_path(), config.site_data_path.as_path()])
        .await
        .context("failed to publish the catalogue index")?;

    tracing::info!(
        rows = summary.rows,
        retained = summary.retained,
        dropped = summary.dropped,
        failed = summary.failed,
        duplicates = summary.duplicates,
        "catalogue build finished"
    );
    Ok(())
}

/// One line per row naming the lookups a real run would attempt.
fn plan_lines(config: &AppConfig, rows: &[CreatorRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let planned: Vec<String> = row
                .configured_platforms()
                .into_iter()
                .map(|p| {
                    if has_credentials(config, p) {
                        p.to_string()
                    } else {
                        format!("{p} (no credentials)")
                    }
                })
                .collect();
            format!(
                "dry-run: {} [{}] -> [{}]",
                row.name,
                row.id(),
                planned.join(", ")
            )
        })
        .collect()
}

fn has_credentials(config: &AppConfig, platform: Platform) -> bool {
    match platform {
        Platform::Youtube => config.youtube_api_key.is_some(),
        Platform::Twitch => config.twitch.is_some(),
        Platform::Vk => config.vk_service_token.is_some(),
    }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod tests;
