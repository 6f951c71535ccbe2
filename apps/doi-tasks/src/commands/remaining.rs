use crate::config::Config;
use crate::error::Result;
use doi_reconcile::{collect, difference_tasks};
use doi_sources::{read_manifest, write_json, FeedReader, StringListSource};
use std::path::Path;
use tracing::{info, warn};

/// Counts reported by [`run_remaining`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingOutcome {
    pub tasks: usize,
    pub downloaded: usize,
    pub remaining: usize,
    pub unusable: usize,
}

/// Recompute a task manifest minus the already-downloaded identifiers,
/// keeping the manifest's order.
pub fn run_remaining(
    config: &Config,
    tasks: &Path,
    downloaded: &Path,
    output: &Path,
) -> Result<RemainingOutcome> {
    let normalizer = config.normalizer()?;
    let manifest = read_manifest(tasks)?;
    let done = collect(&normalizer, StringListSource::open(downloaded)?.read_rows()?);

    let diff = difference_tasks(&manifest, &normalizer, &done.collection);
    for task in &diff.unusable {
        warn!(
            doi = %task.identifier,
            validator = %task.registrant_prefix,
            "task identifier does not normalize; kept"
        );
    }
    write_json(output, &diff.remaining)?;

    let outcome = RemainingOutcome {
        tasks: manifest.len(),
        downloaded: done.collection.len(),
        remaining: diff.remaining.len(),
        unusable: diff.unusable.len(),
    };
    info!(
        tasks = outcome.tasks,
        downloaded = outcome.downloaded,
        remaining = outcome.remaining,
        "remaining tasks written to {}",
        output.display()
    );
    Ok(outcome)
}
