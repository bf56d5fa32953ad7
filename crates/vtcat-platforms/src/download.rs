use reqwest::Client;

use crate::error::PlatformError;
use crate::http::send_for_bytes;
use crate::store::CreatorDir;

/// Downloads `url` into `file` inside `dir`.
///
/// Returns `true` when the image was written. Failures are logged and
/// reported as `false`; a missing image never fails the platform.
pub(crate) async fn download_image(
    client: &Client,
    url: &str,
    dir: &CreatorDir,
    file: &str,
) -> bool {
    match fetch_image(client, url).await {
        Ok(bytes) => match dir.write(file, &bytes).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(url, file, error = %e, "could not store image");
                false
            }
        },
        Err(e) => {
            tracing::warn!(url, file, error = %e, "image download failed");
            false
        }
    }
}

async fn fetch_image(client: &Client, url: &str) -> Result<Vec<u8>, PlatformError> {
    let bytes = send_for_bytes(client.get(url)).await?;
    if bytes.is_empty() {
        return Err(PlatformError::EmptyBody {
            url: url.to_string(),
        });
    }
    Ok(bytes)
}
