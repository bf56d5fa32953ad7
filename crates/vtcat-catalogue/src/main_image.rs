use vtcat_core::{CreatorProfile, Platform};

/// Picks the platform whose avatar becomes the creator's main image.
///
/// A preferred tag wins when that platform resolved with an icon. Otherwise
/// (no tag, unknown tag, platform unresolved or without icon) the first
/// platform with an icon in fixed order youtube, twitch, vk is used.
#[must_use]
pub fn select_main_image(profile: &CreatorProfile, preferred: Option<&str>) -> Option<Platform> {
    let has_icon = |p: Platform| profile.channel(p).is_some_and(|c| c.icon);

    if let Some(tag) = preferred {
        match tag.parse::<Platform>() {
            Ok(platform) if has_icon(platform) => return Some(platform),
            Ok(platform) => tracing::warn!(
                creator = %profile.id,
                %platform,
                "preferred platform has no icon; using fallback order"
            ),
            Err(e) => tracing::warn!(
                creator = %profile.id,
                error = %e,
                "ignoring preferred platform tag"
            ),
        }
    }

    Platform::ALL.into_iter().find(|p| has_icon(*p))
}
