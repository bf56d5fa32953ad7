use std::collections::HashSet;

use vtcat_core::{CreatorId, CreatorProfile, CreatorRow};

use crate::aggregator::Aggregator;

/// Counters reported at the end of a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub rows: usize,
    pub retained: usize,
    /// Rows where no platform resolved.
    pub dropped: usize,
    /// Rows aborted by a filesystem error.
    pub failed: usize,
    /// Rows whose name repeats an earlier row's.
    pub duplicates: usize,
}

/// Processes `rows` one at a time, in feed order.
///
/// Identifiers are unique in the catalogue: a row whose name hashes to an
/// already seen id is skipped before any lookup, so the earlier creator's
/// directory is left intact. A row that fails with a filesystem error is
/// logged and skipped; the rest of the run continues.
pub async fn build_catalogue(
    rows: &[CreatorRow],
    aggregator: &Aggregator<'_>,
) -> (Vec<CreatorProfile>, BuildSummary) {
    let mut profiles = Vec::with_capacity(rows.len());
    let mut summary = BuildSummary {
        rows: rows.len(),
        ..BuildSummary::default()
    };

    let mut seen: HashSet<CreatorId> = HashSet::with_capacity(rows.len());

    for row in rows {
        let id = row.id();
        if !seen.insert(id.clone()) {
            tracing::warn!(
                creator = %id,
                name = %row.name,
                "duplicate creator name; row skipped"
            );
            summary.duplicates += 1;
            continue;
        }

        match aggregator.aggregate(row).await {
            Ok(Some(profile)) => {
                let platforms: Vec<&str> = profile.channels().map(|(p, _)| p.as_str()).collect();
                tracing::info!(
                    creator = %profile.id,
                    name = %profile.name,
                    platforms = %platforms.join(","),
                    "creator retained"
                );
                profiles.push(profile);
                summary.retained += 1;
            }
            Ok(None) => {
                tracing::info!(name = %row.name, "no platform resolved; creator dropped");
                summary.dropped += 1;
            }
            Err(e) => {
                tracing::error!(name = %row.name, error = %e, "creator failed; skipping");
                summary.failed += 1;
            }
        }
    }

    (profiles, summary)
}
