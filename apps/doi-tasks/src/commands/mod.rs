//! Command implementations
//!
//! Each command reads its sources, runs the reconciliation core, writes its
//! outputs and returns counts for the final log line.

mod inventory;
mod listing;
mod partition;
mod remaining;
mod validated;

pub use inventory::{run_inventory, InventoryOutputs, MALFORMED_REPORT};
pub use listing::run_export_listing;
pub use partition::{run_partition, PartitionOutcome};
pub use remaining::{run_remaining, RemainingOutcome};
pub use validated::run_validated;

use crate::config::Config;
use crate::error::Result;
use doi_identifiers::{Identifier, Normalizer};
use doi_reconcile::{classify, collect, union, Collected, MissingRecord, RowOutcome, SourceRow};
use doi_sources::{open_feed, scan_dir, SourceResult};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// All tabular sources of a directory, collected and merged
#[derive(Debug, Default)]
pub struct SourceScan {
    pub collected: Collected,
    pub files: usize,
    pub failed_sources: usize,
}

/// Collect every tabular file in `dir`.
///
/// Files are collected in parallel, each into its own collection, then
/// merged in file-name order. A file that cannot be read is logged and
/// skipped; the other files still contribute.
pub fn scan_sources(dir: &Path, config: &Config, normalizer: &Normalizer) -> Result<SourceScan> {
    let files = scan_dir(dir, &config.tabular)?;
    info!(dir = %dir.display(), files = files.len(), "scanning tabular sources");

    let results: Vec<(PathBuf, SourceResult<Collected>)> = files
        .par_iter()
        .map(|path| {
            let collected = open_feed(path, &config.tabular)
                .and_then(|source| source.read_rows())
                .map(|rows| collect(normalizer, rows));
            (path.clone(), collected)
        })
        .collect();

    let mut scan = SourceScan {
        files: files.len(),
        ..Default::default()
    };
    let mut parts = Vec::new();
    for (path, result) in results {
        match result {
            Ok(collected) => parts.push(collected),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable source");
                scan.failed_sources += 1;
            }
        }
    }

    scan.collected = Collected {
        collection: union(parts.iter().map(|p| &p.collection)),
        missing: parts.iter().flat_map(|p| p.missing.iter().cloned()).collect(),
        rows_processed: parts.iter().map(|p| p.rows_processed).sum(),
    };
    Ok(scan)
}

/// Normalize a feed row by row, keeping duplicates and order.
///
/// Returns the identifiers and the rows that had no usable value.
pub fn identifiers_in_order(
    normalizer: &Normalizer,
    rows: Vec<SourceRow>,
) -> (Vec<Identifier>, Vec<MissingRecord>) {
    let mut identifiers = Vec::with_capacity(rows.len());
    let mut missing = Vec::new();
    for row in rows {
        match classify(normalizer, row) {
            RowOutcome::Valid(identifier, _) => identifiers.push(identifier),
            RowOutcome::Missing(record) => missing.push(record),
        }
    }
    (identifiers, missing)
}
