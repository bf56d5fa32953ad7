use thiserror::Error;

use vtcat_platforms::PlatformError;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Store(#[from] PlatformError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

impl CatalogueError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
