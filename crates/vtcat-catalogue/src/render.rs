//! Static rendition of the catalogue cards.
//!
//! Markup matches what the catalogue page builds in the browser, so the same
//! stylesheet applies to either.

use std::path::Path;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use vtcat_core::{CreatorProfile, Platform};
use vtcat_platforms::MAIN_ICON_FILE;

use crate::error::CatalogueError;
use crate::index::read_index;

const CONTAINER_OPEN: &str =
    r#"<div class="row row-cols-1 row-cols-sm-2 row-cols-md-3" id="vtuber-catalogue">"#;
const CONTAINER_CLOSE: &str = "</div>\n";

/// Button order on each card.
const BUTTON_ORDER: [Platform; 3] = [Platform::Vk, Platform::Twitch, Platform::Youtube];

/// Renders one card per profile, in the given order, inside the catalogue
/// container. `asset_base` is the URL prefix of the creator directories.
#[must_use]
pub fn render_catalogue(profiles: &[CreatorProfile], asset_base: &str) -> String {
    let mut html = String::new();
    html.push_str(CONTAINER_OPEN);
    html.push('\n');
    for profile in profiles {
        render_card(&mut html, profile, asset_base);
    }
    html.push_str(CONTAINER_CLOSE);
    html
}

fn render_card(html: &mut String, profile: &CreatorProfile, asset_base: &str) {
    let base = asset_base.trim_end_matches('/');
    let image = format!("{base}/{}/{MAIN_ICON_FILE}", profile.id);
    let image = attr(&image);
    let id = attr(profile.id.as_str());

    let mut buttons = String::new();
    for platform in BUTTON_ORDER {
        if let Some(channel) = profile.channel(platform) {
            buttons.push_str(&format!(
                r#"<a class="btn btn-social {p}" href="{href}" title="{title}"><i class="fa fa-{p}"></i></a>"#,
                p = platform.as_str(),
                href = attr(&channel.url),
                title = attr(&channel.name),
            ));
        }
    }

    html.push_str(&format!(
        r#"<div class="col">
    <div class="card mb-3">
        <div class="row g-0">
            <div class="col-md-4 size-hack rounded shadow" style="background-image:url({image});background-position:center;background-size:cover;">
                <img src="{image}" class="sr-only" alt="">
            </div>
            <div class="col-md-8">
                <div class="card-body">
                    <h5 class="card-title">{name}</h5>
                    <p class="card-text" id="{id}-desc"></p>
                    {buttons}
                </div>
            </div>
        </div>
    </div>
</div>
"#,
        name = text(&profile.name),
    ));
}

/// Reads `index` and writes the rendered catalogue to `output`.
///
/// An index that cannot be read or decoded renders as an empty container;
/// the failure is only logged.
///
/// # Errors
///
/// Returns [`CatalogueError::Io`] if `output` cannot be written.
pub async fn render_index_file(
    index: &Path,
    output: &Path,
    asset_base: &str,
) -> Result<usize, CatalogueError> {
    let profiles = match read_index(index).await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::warn!(
                index = %index.display(),
                error = %e,
                "catalogue index unavailable; rendering empty catalogue"
            );
            Vec::new()
        }
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CatalogueError::io(parent, e))?;
    }
    tokio::fs::write(output, render_catalogue(&profiles, asset_base))
        .await
        .map_err(|e| CatalogueError::io(output, e))?;
    Ok(profiles.len())
}

#[cfg(test)]
mod tests {
    use vtcat_core::{ChannelInfo, CreatorRow};

    use super::*;

    fn channel(row: &CreatorRow, name: &str, url: &str) -> ChannelInfo {
        ChannelInfo {
            id: row.id(),
            name: name.to_string(),
            description: String::new(),
            url: url.to_string(),
            icon: true,
            cover: false,
        }
    }

    #[test]
    fn empty_catalogue_is_just_the_container() {
        assert_eq!(
            render_catalogue(&[], "upload/vtubers"),
            format!("{CONTAINER_OPEN}\n{CONTAINER_CLOSE}")
        );
    }

    #[test]
    fn card_points_at_main_icon_and_escapes_text() {
        let row = CreatorRow::from_cells(&["Tom & <Jerry>"]);
        let mut profile = CreatorProfile::new(&row);
        profile.set_channel(
            Platform::Twitch,
            channel(&row, "say \"hi\"", "https://www.twitch.tv/tom?a=1&b=2"),
        );

        let html = render_catalogue(&[profile.clone()], "upload/vtubers/");
        let icon = format!("upload/vtubers/{}/main_icon.jpg", profile.id);
        assert!(html.contains(&format!("background-image:url({icon})")));
        assert!(html.contains(&format!(r#"<img src="{icon}" class="sr-only" alt="">"#)));
        assert!(html.contains(r#"<h5 class="card-title">Tom &amp; &lt;Jerry&gt;</h5>"#));
        assert!(html.contains(&format!(r#"id="{}-desc""#, profile.id)));
        assert!(html.contains(r#"href="https://www.twitch.tv/tom?a=1&amp;b=2""#));
        assert!(html.contains(r#"title="say &quot;hi&quot;""#));
        assert!(html.contains(r#"<i class="fa fa-twitch"></i>"#));
    }

    #[test]
    fn buttons_follow_vk_twitch_youtube_order() {
        let row = CreatorRow::from_cells(&["Carol"]);
        let mut profile = CreatorProfile::new(&row);
        profile.set_channel(Platform::Youtube, channel(&row, "Carol YT", "https://yt/c"));
        profile.set_channel(Platform::Vk, channel(&row, "Carol VK", "https://vk.com/c"));

        let html = render_catalogue(&[profile], "upload/vtubers");
        let vk = html.find("btn-social vk").unwrap();
        let yt = html.find("btn-social youtube").unwrap();
        assert!(vk < yt);
        assert!(!html.contains("btn-social twitch"));
    }
}
