//! The published catalogue index (`index.json`).

use std::path::{Path, PathBuf};

use vtcat_core::json::to_embeddable_vec;
use vtcat_core::CreatorProfile;

use crate::error::CatalogueError;

/// Encodes the catalogue with unicode kept as-is and markup characters
/// hex-escaped.
///
/// # Errors
///
/// Returns [`CatalogueError::Json`] if serialization fails.
pub fn encode_index(profiles: &[CreatorProfile]) -> Result<Vec<u8>, CatalogueError> {
    to_embeddable_vec(profiles).map_err(|e| CatalogueError::Json {
        context: "catalogue index".to_string(),
        source: e,
    })
}

/// Writes the whole index to every destination.
///
/// Each copy goes to a sibling `.tmp` file first and is renamed into place,
/// so readers never observe a half-written index.
///
/// # Errors
///
/// Returns [`CatalogueError`] on encode failure or on the first destination
/// that cannot be written.
pub async fn write_index(
    profiles: &[CreatorProfile],
    destinations: &[&Path],
) -> Result<(), CatalogueError> {
    let encoded = encode_index(profiles)?;
    for destination in destinations {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogueError::io(parent, e))?;
        }
        let tmp = temp_path(destination);
        tokio::fs::write(&tmp, &encoded)
            .await
            .map_err(|e| CatalogueError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, destination)
            .await
            .map_err(|e| CatalogueError::io(destination, e))?;
        tracing::info!(path = %destination.display(), entries = profiles.len(), "index written");
    }
    Ok(())
}

/// # Errors
///
/// Returns [`CatalogueError::Io`] if the file cannot be read and
/// [`CatalogueError::Json`] if it is not a valid index.
pub async fn read_index(path: &Path) -> Result<Vec<CreatorProfile>, CatalogueError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CatalogueError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| CatalogueError::Json {
        context: path.display().to_string(),
        source: e,
    })
}

fn temp_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    destination.with_file_name(name)
}
