//! doi-tasks - DOI inventory and fetch-task preparation
//!
//! Commands:
//! - `inventory`: unique DOIs, duplicate and missing-value reports for a folder of exports
//! - `partition`: per-registrant task files plus a ranked summary index
//! - `remaining`: a task manifest minus what is already downloaded
//! - `validated`: downloaded DOIs still present in the current exports
//! - `export-listing`: object-store listing → downloaded-set list

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{CliError, Result};
