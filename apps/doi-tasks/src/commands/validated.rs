use super::{identifiers_in_order, scan_sources};
use crate::config::Config;
use crate::error::Result;
use doi_reconcile::filter_intersection;
use doi_sources::{write_json, FeedReader, StringListSource};
use std::path::Path;
use tracing::{info, warn};

/// Of the downloaded identifiers, keep those still present in a current
/// tabular source. Output follows the downloaded list's order.
///
/// Returns the number of identifiers written.
pub fn run_validated(
    config: &Config,
    downloaded: &Path,
    input: &Path,
    output: &Path,
) -> Result<usize> {
    let normalizer = config.normalizer()?;
    let rows = StringListSource::open(downloaded)?.read_rows()?;
    let (base, missing) = identifiers_in_order(&normalizer, rows);
    for record in &missing {
        warn!(
            file = %record.location.source,
            row = record.location.row,
            reason = ?record.reason,
            "downloaded entry without a usable identifier"
        );
    }

    let scan = scan_sources(input, config, &normalizer)?;
    info!(pool = scan.collected.collection.len(), "identifiers in current sources");

    let kept = filter_intersection(&base, &scan.collected.collection);
    let values: Vec<&str> = kept.iter().map(|id| id.display()).collect();
    write_json(output, &values)?;

    info!(kept = kept.len(), "validated downloads written to {}", output.display());
    Ok(kept.len())
}
