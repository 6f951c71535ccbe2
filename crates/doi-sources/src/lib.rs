//! doi-sources - source feeds and outputs for DOI reconciliation
//!
//! This crate reads identifier feeds from the places they live:
//!
//! - **Tabular exports**: CSV/TSV files with a DOI column
//! - **Workbooks**: XLS/XLSX exports, read with `calamine`
//! - **Object-store listings**: document keys such as `10.1016/j.x.1/_.html.gz`
//! - **Task manifests**: JSON arrays of `{"doi", "validator"}` items
//! - **Downloaded sets**: JSON arrays of identifier strings
//!
//! and writes the JSON reports produced by `doi-reconcile`.
//!
//! # Design
//!
//! Every feed implements the `FeedReader` trait and yields `SourceRow`s;
//! nothing here interprets identifiers beyond stripping listing suffixes.

pub mod error;
pub mod listing;
pub mod manifest;
pub mod output;
pub mod reader;

#[cfg(feature = "csv")]
pub mod tabular;

#[cfg(feature = "workbook")]
pub mod workbook;

pub use error::*;
pub use listing::*;
pub use manifest::*;
pub use output::*;
pub use reader::*;

#[cfg(feature = "csv")]
pub use tabular::*;

#[cfg(feature = "workbook")]
pub use workbook::*;
