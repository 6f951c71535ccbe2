use super::scan_sources;
use crate::config::Config;
use crate::error::Result;
use doi_reconcile::{duplicates, group_by_prefix, unique_keys, RunReport};
use doi_sources::write_json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Identifiers without a registrant prefix, written by `inventory` and `partition`
pub const MALFORMED_REPORT: &str = "malformed_dois_report.json";

/// Files written by [`run_inventory`]
#[derive(Debug, Clone)]
pub struct InventoryOutputs {
    pub unique: PathBuf,
    pub duplicates: PathBuf,
    pub missing: PathBuf,
    pub malformed: PathBuf,
}

impl InventoryOutputs {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            unique: dir.join("all_unique_dois.json"),
            duplicates: dir.join("duplicate_dois_report.json"),
            missing: dir.join("missing_dois_report.json"),
            malformed: dir.join(MALFORMED_REPORT),
        }
    }
}

/// Inventory every source in `input`: unique identifiers, duplicates with
/// their locations, rows without a usable DOI, and identifiers without a
/// registrant prefix.
pub fn run_inventory(config: &Config, input: &Path, output: &Path) -> Result<RunReport> {
    let normalizer = config.normalizer()?;
    let scan = scan_sources(input, config, &normalizer)?;
    let collected = &scan.collected;

    let unique = unique_keys(&collected.collection);
    let report = duplicates(&collected.collection);
    let identifiers: Vec<_> = collected.collection.identifiers().cloned().collect();
    let malformed = group_by_prefix(&identifiers).malformed;
    for item in &malformed {
        warn!(identifier = %item.identifier, error = %item.error, "no registrant prefix");
    }

    let outputs = InventoryOutputs::in_dir(output);
    write_json(&outputs.unique, &unique)?;
    write_json(&outputs.duplicates, &report)?;
    write_json(&outputs.missing, &collected.missing)?;
    write_json(&outputs.malformed, &malformed)?;

    let run = RunReport::from_collected(collected, &report)
        .with_malformed(malformed.len())
        .with_failed_sources(scan.failed_sources);
    info!(
        unique = run.unique,
        duplicate_kinds = run.duplicate_kinds,
        duplicate_instances = run.duplicate_instances,
        missing = run.missing,
        malformed = run.malformed,
        "inventory written to {}",
        output.display()
    );
    Ok(run)
}
