use crate::config::Config;
use crate::error::Result;
use doi_reconcile::{collect, unique_keys};
use doi_sources::{write_json, FeedReader, ListingFile, ListingSource};
use std::path::Path;
use tracing::info;

/// Turn an object-store listing export into a sorted downloaded-set list.
///
/// Returns the number of distinct identifiers written.
pub fn run_export_listing(config: &Config, listing: &Path, output: &Path) -> Result<usize> {
    let normalizer = config.normalizer()?;
    let source = ListingSource::new(ListingFile::open(listing)?, config.listing.clone());
    let collected = collect(&normalizer, source.read_rows()?);

    let keys = unique_keys(&collected.collection);
    write_json(output, &keys)?;

    info!(
        documents = collected.rows_processed,
        unique = keys.len(),
        unusable = collected.missing.len(),
        "listing exported to {}",
        output.display()
    );
    Ok(keys.len())
}
