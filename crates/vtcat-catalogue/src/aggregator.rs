//! Per-creator aggregation: resolve every configured platform, then write
//! the creator's main image and front-matter document.

use std::path::Path;

use vtcat_core::{CreatorProfile, CreatorRow, Platform};
use vtcat_platforms::{CreatorDir, PlatformClients, MAIN_ICON_FILE, PROFILE_FILE};

use crate::error::CatalogueError;
use crate::front_matter::FrontMatter;
use crate::main_image::select_main_image;
use crate::sanitize::sanitize_text;

pub struct Aggregator<'a> {
    clients: &'a PlatformClients,
    creators_root: &'a Path,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(clients: &'a PlatformClients, creators_root: &'a Path) -> Self {
        Self {
            clients,
            creators_root,
        }
    }

    /// Resolves one feed row into a catalogue entry.
    ///
    /// Returns `Ok(None)` when no platform resolved. The creator directory
    /// and any partial files written by the clients stay on disk in that case.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the creator directory cannot be created
    /// or the main image / front matter cannot be written. Platform lookup
    /// failures are logged and never surface here.
    pub async fn aggregate(
        &self,
        row: &CreatorRow,
    ) -> Result<Option<CreatorProfile>, CatalogueError> {
        let mut profile = CreatorProfile::new(row);
        let dir = CreatorDir::new(self.creators_root, &profile.id);
        dir.ensure().await?;

        for platform in Platform::ALL {
            let Some(url) = row.url_for(platform) else {
                continue;
            };
            match self.clients.resolve(platform, &profile.id, url, &dir).await {
                Ok(mut info) => {
                    info.description = sanitize_text(&info.description);
                    profile.set_channel(platform, info);
                }
                Err(e) => {
                    tracing::warn!(
                        creator = %profile.id,
                        %platform,
                        url,
                        error = %e,
                        "platform unresolved"
                    );
                }
            }
        }

        if !profile.has_any_channel() {
            return Ok(None);
        }

        match select_main_image(&profile, row.preferred_tag()) {
            Some(platform) => dir.copy(&platform.icon_file(), MAIN_ICON_FILE).await?,
            None => tracing::warn!(creator = %profile.id, "no avatar available for main image"),
        }

        let document = FrontMatter::from_profile(&profile).render()?;
        dir.write(PROFILE_FILE, document.as_bytes()).await?;

        Ok(Some(profile))
    }
}
