pub mod clients;
mod download;
pub mod error;
pub mod http;
pub mod sheet;
pub mod store;
pub mod twitch;
pub mod vk;
pub mod youtube;

pub use clients::{PlatformClient, PlatformClients};
pub use error::{PlatformError, ResolutionError};
pub use http::build_http_client;
pub use sheet::fetch_rows;
pub use store::{CreatorDir, MAIN_ICON_FILE, PROFILE_FILE};
pub use twitch::TwitchClient;
pub use vk::VkClient;
pub use youtube::YoutubeClient;
