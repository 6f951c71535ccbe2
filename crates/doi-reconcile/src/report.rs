//! Run counters

use crate::collector::Collected;
use crate::reconcile::DuplicateReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts of one reconciliation run, so partial success stays visible
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub rows_processed: usize,
    /// Rows that produced an identifier
    pub valid: usize,
    pub unique: usize,
    /// Distinct identifiers seen more than once
    pub duplicate_kinds: usize,
    /// Occurrences beyond the first of each duplicated identifier
    pub duplicate_instances: usize,
    /// Rows with an absent, blank or unusable value
    pub missing: usize,
    /// Identifiers excluded from grouping for lack of a registrant prefix
    pub malformed: usize,
    /// Sources that could not be read this run
    pub failed_sources: usize,
}

impl RunReport {
    pub fn from_collected(collected: &Collected, duplicates: &DuplicateReport) -> Self {
        Self {
            rows_processed: collected.rows_processed,
            valid: collected.valid_rows(),
            unique: collected.collection.len(),
            duplicate_kinds: duplicates.kinds(),
            duplicate_instances: duplicates.extra_occurrences(),
            missing: collected.missing.len(),
            ..Default::default()
        }
    }

    pub fn with_malformed(mut self, malformed: usize) -> Self {
        self.malformed = malformed;
        self
    }

    pub fn with_failed_sources(mut self, failed_sources: usize) -> Self {
        self.failed_sources = failed_sources;
        self
    }

    /// Every processed row is accounted for
    pub fn is_conserved(&self) -> bool {
        self.valid + self.missing == self.rows_processed
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows={} valid={} unique={} duplicate_kinds={} duplicate_instances={} missing={} malformed={} failed_sources={}",
            self.rows_processed,
            self.valid,
            self.unique,
            self.duplicate_kinds,
            self.duplicate_instances,
            self.missing,
            self.malformed,
            self.failed_sources
        )
    }
}
