pub mod aggregator;
pub mod builder;
pub mod error;
pub mod front_matter;
pub mod index;
pub mod main_image;
pub mod render;
pub mod sanitize;

pub use aggregator::Aggregator;
pub use builder::{build_catalogue, BuildSummary};
pub use error::CatalogueError;
pub use front_matter::FrontMatter;
pub use index::{encode_index, read_index, write_index};
pub use main_image::select_main_image;
pub use render::{render_catalogue, render_index_file};
pub use sanitize::sanitize_text;
