//! Location-tracked collection of a single source feed

use crate::collection::IdentifierCollection;
use crate::location::{Location, MissingReason, MissingRecord, SourceRow};
use doi_identifiers::{Identifier, Normalizer};

/// Output of [`collect`]
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub collection: IdentifierCollection,
    pub missing: Vec<MissingRecord>,
    pub rows_processed: usize,
}

impl Collected {
    /// Rows that produced an identifier
    pub fn valid_rows(&self) -> usize {
        self.collection.occurrences()
    }

    /// Missing records whose cell had text that failed to normalize
    pub fn unusable(&self) -> impl Iterator<Item = &MissingRecord> {
        self.missing
            .iter()
            .filter(|m| matches!(m.reason, MissingReason::Unusable { .. }))
    }
}

/// How a single row was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid(Identifier, Location),
    Missing(MissingRecord),
}

/// Classify one row as an identifier occurrence or a missing record
pub fn classify(normalizer: &Normalizer, row: SourceRow) -> RowOutcome {
    let location = row.location();
    let reason = match row.value {
        None => MissingReason::Absent,
        Some(raw) if raw.trim().is_empty() => MissingReason::Blank,
        Some(raw) => match normalizer.normalize(&raw) {
            Ok(identifier) => return RowOutcome::Valid(identifier, location),
            Err(_) => MissingReason::Unusable { raw },
        },
    };
    RowOutcome::Missing(MissingRecord { location, reason })
}

/// Collect one source feed.
///
/// Every row ends up either as a location of a collection entry or as a
/// missing record, so `valid_rows() + missing.len() == rows_processed`.
pub fn collect<I>(normalizer: &Normalizer, rows: I) -> Collected
where
    I: IntoIterator<Item = SourceRow>,
{
    let mut out = Collected {
        collection: IdentifierCollection::new(),
        ..Default::default()
    };

    for row in rows {
        out.rows_processed += 1;
        match classify(normalizer, row) {
            RowOutcome::Valid(identifier, location) => out.collection.record(&identifier, location),
            RowOutcome::Missing(record) => out.missing.push(record),
        }
    }

    out
}
