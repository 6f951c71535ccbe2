use super::inventory::MALFORMED_REPORT;
use super::scan_sources;
use crate::config::Config;
use crate::error::Result;
use doi_reconcile::{
    collect, difference, duplicates, emit_tasks, group_by_prefix, rank, RunReport,
};
use doi_sources::{write_json, FeedReader, StringListSource};
use std::path::Path;
use tracing::{info, warn};

/// Result of [`run_partition`]
#[derive(Debug, Clone)]
pub struct PartitionOutcome {
    pub report: RunReport,
    /// Identifiers dropped because they were already downloaded
    pub excluded: usize,
    pub groups: usize,
    pub batch_files: usize,
}

/// Group every identifier of `input` by registrant prefix and write
/// `validator_index.json` plus one `tasks/task_<prefix>.json` per batch.
/// Identifiers without a registrant prefix go to `malformed_dois_report.json`.
///
/// With `exclude`, identifiers listed in that downloaded-set file are left
/// out first.
pub fn run_partition(
    config: &Config,
    input: &Path,
    output: &Path,
    exclude: Option<&Path>,
) -> Result<PartitionOutcome> {
    let normalizer = config.normalizer()?;
    let scan = scan_sources(input, config, &normalizer)?;
    let all: Vec<_> = scan.collected.collection.identifiers().cloned().collect();

    let pending = match exclude {
        Some(path) => {
            let downloaded = collect(&normalizer, StringListSource::open(path)?.read_rows()?);
            difference(&all, &downloaded.collection)
        }
        None => all.clone(),
    };
    let excluded = all.len() - pending.len();

    let grouping = group_by_prefix(&pending);
    for item in &grouping.malformed {
        warn!(identifier = %item.identifier, error = %item.error, "excluded from grouping");
    }
    write_json(output.join(MALFORMED_REPORT), &grouping.malformed)?;

    let index = rank(&grouping, normalizer.base_url());
    write_json(output.join("validator_index.json"), &index)?;

    let tasks_dir = output.join("tasks");
    let batches = emit_tasks(&grouping, &config.partition, normalizer.base_url());
    for batch in &batches {
        write_json(
            tasks_dir.join(batch.file_name(&config.partition.unsafe_chars)),
            &batch.items,
        )?;
    }

    let top: Vec<String> = index
        .top(3)
        .iter()
        .map(|e| format!("{}({})", e.prefix, e.count))
        .collect();
    info!(
        prefixes = index.len(),
        batches = batches.len(),
        excluded,
        "top prefixes: {}",
        top.join(", ")
    );

    let duplicate_report = duplicates(&scan.collected.collection);
    let report = RunReport::from_collected(&scan.collected, &duplicate_report)
        .with_malformed(grouping.malformed.len())
        .with_failed_sources(scan.failed_sources);

    Ok(PartitionOutcome {
        report,
        excluded,
        groups: index.len(),
        batch_files: batches.len(),
    })
}
