//! Feed reader trait
//!
//! The `FeedReader` trait gives the reconciliation core a uniform view of
//! every source: an ordered list of `(source, row, value)` rows.

use crate::error::SourceResult;
use doi_reconcile::SourceRow;

/// Trait for reading a source feed
pub trait FeedReader: Send + Sync {
    /// Name recorded in every location from this source
    fn source_name(&self) -> &str;

    /// Read all rows, in source order
    fn read_rows(&self) -> SourceResult<Vec<SourceRow>>;

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed reader for dynamic dispatch
pub type BoxedFeedReader = Box<dyn FeedReader>;
