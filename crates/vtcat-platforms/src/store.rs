//! Per-creator working directory.
//!
//! Every file a run produces for one creator lives under
//! `<creators root>/<creator id>/`. Files are overwritten in place; files
//! from platforms that are no longer configured are left alone.

use std::path::{Path, PathBuf};

use vtcat_core::CreatorId;

use crate::error::PlatformError;

pub const MAIN_ICON_FILE: &str = "main_icon.jpg";
pub const PROFILE_FILE: &str = "index.md";

#[derive(Debug, Clone)]
pub struct CreatorDir {
    root: PathBuf,
}

impl CreatorDir {
    #[must_use]
    pub fn new(creators_root: &Path, id: &CreatorId) -> Self {
        Self {
            root: creators_root.join(id.as_str()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Creates the directory (and the creators root) if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if the directory cannot be created.
    pub async fn ensure(&self) -> Result<(), PlatformError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PlatformError::io(&self.root, e))
    }

    /// Writes `contents` to `file`, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if the write fails.
    pub async fn write(&self, file: &str, contents: &[u8]) -> Result<(), PlatformError> {
        let path = self.path(file);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| PlatformError::io(&path, e))
    }

    pub async fn exists(&self, file: &str) -> bool {
        tokio::fs::try_exists(self.path(file)).await.unwrap_or(false)
    }

    /// Copies `from` to `to` inside the directory.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if `from` is missing or the copy fails.
    pub async fn copy(&self, from: &str, to: &str) -> Result<(), PlatformError> {
        let source = self.path(from);
        tokio::fs::copy(&source, self.path(to))
            .await
            .map(|_| ())
            .map_err(|e| PlatformError::io(&source, e))
    }
}
