//! Recognized channel URL shapes.

use std::sync::LazyLock;

use regex::Regex;

static CHANNEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/channel/([^/]+?)$").expect("valid channel regex"));
static USER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/user/([^/]+?)$").expect("valid user regex"));
static PLAYLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/playlist\?list=([^/]+?)$").expect("valid playlist regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Channel,
    User,
    Playlist,
}

impl EntityKind {
    /// Query parameter the activity feed expects for this kind.
    #[must_use]
    pub fn feed_param(self) -> &'static str {
        match self {
            EntityKind::Channel => "channel_id",
            EntityKind::User => "user",
            EntityKind::Playlist => "playlist_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub id: String,
}

/// Matches `url` against the channel, legacy user, and playlist shapes, in
/// that order. A single trailing slash is ignored.
#[must_use]
pub fn parse_entity(url: &str) -> Option<Entity> {
    let url = url.trim().trim_end_matches('/');
    [
        (EntityKind::Channel, &*CHANNEL_RE),
        (EntityKind::User, &*USER_RE),
        (EntityKind::Playlist, &*PLAYLIST_RE),
    ]
    .into_iter()
    .find_map(|(kind, re)| {
        re.captures(url)
            .and_then(|c| c.get(1))
            .map(|m| Entity {
                kind,
                id: m.as_str().to_string(),
            })
    })
}
