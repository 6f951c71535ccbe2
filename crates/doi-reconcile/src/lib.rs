//! Identifier reconciliation and task partitioning
//!
//! The pipeline has three stages, all pure and in-memory:
//!
//! - **Collect**: turn a source feed of `(source, row, value)` rows into an
//!   [`IdentifierCollection`] that remembers every location an identifier was
//!   seen at, plus a report of rows with no usable value.
//! - **Reconcile**: inventories, duplicate reports, unions, and
//!   order-preserving differences/intersections between collections.
//! - **Partition**: bucket outstanding identifiers by registrant prefix,
//!   rank the buckets, and emit one task batch per bucket.
//!
//! Reading and writing files is left to the caller (see `doi-sources`).

pub mod collection;
pub mod collector;
pub mod location;
pub mod partition;
pub mod reconcile;
pub mod report;
pub mod task;

pub use collection::{CollectionEntry, IdentifierCollection};
pub use collector::{classify, collect, Collected, RowOutcome};
pub use location::{Location, MissingReason, MissingRecord, SourceRow};
pub use partition::{
    emit_tasks, group_by_prefix, rank, Grouping, MalformedItem, PartitionConfig,
    RegistrantGroup, SummaryEntry, SummaryIndex, TaskBatch,
};
pub use reconcile::{
    difference, difference_tasks, duplicates, filter_intersection, union, unique_keys,
    DuplicateEntry, DuplicateReport, TaskDifference,
};
pub use report::RunReport;
pub use task::TaskItem;
