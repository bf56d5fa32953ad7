use std::path::Path;

use anyhow::Context;

/// # Errors
///
/// Returns an error only if the output file cannot be written.
pub(crate) async fn run_render(
    index: &Path,
    output: &Path,
    asset_base: &str,
) -> anyhow::Result<()> {
    let cards = vtcat_catalogue::render_index_file(index, output, asset_base)
        .await
        .with_context(|| format!("failed to render catalogue to {}", output.display()))?;
    tracing::info!(cards, output = %output.display(), "catalogue rendered");
    Ok(())
}
