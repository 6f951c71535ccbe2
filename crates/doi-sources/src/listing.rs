//! Object-store listing feeds
//!
//! Fetched documents are stored one object per DOI, keyed as
//! `<doi>/_.html.gz`. A listing of the bucket therefore doubles as the set
//! of identifiers that are already downloaded.

use crate::error::{SourceError, SourceResult};
use crate::reader::FeedReader;
use doi_reconcile::SourceRow;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for listing sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Suffix marking a stored document; other keys are ignored
    pub object_suffix: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            object_suffix: "/_.html.gz".to_string(),
        }
    }
}

/// Anything that can enumerate object keys
pub trait ObjectLister: Send + Sync {
    /// Name of the bucket or export being listed
    fn name(&self) -> &str;

    /// All object keys, in listing order
    fn list_keys(&self) -> SourceResult<Vec<String>>;
}

/// A listing exported to a file: either one key per line or a JSON array
pub struct ListingFile {
    path: PathBuf,
    name: String,
}

impl ListingFile {
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SourceError::FileNotFound(path.display().to_string()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
        })
    }
}

impl ObjectLister for ListingFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_keys(&self) -> SourceResult<Vec<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| SourceError::OpenFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        if content.trim_start().starts_with('[') {
            return serde_json::from_str(&content).map_err(|e| SourceError::Json {
                path: self.path.display().to_string(),
                message: e.to_string(),
            });
        }

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Feed of identifiers found in an object listing.
///
/// Rows are numbered with a running counter over the kept keys.
pub struct ListingSource<L: ObjectLister> {
    lister: L,
    config: ListingConfig,
}

impl<L: ObjectLister> ListingSource<L> {
    pub fn new(lister: L, config: ListingConfig) -> Self {
        Self { lister, config }
    }

    /// The identifier part of a document key, if the key is a document
    pub fn identifier_of<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_suffix(self.config.object_suffix.as_str())
            .filter(|rest| !rest.is_empty())
    }
}

impl<L: ObjectLister> FeedReader for ListingSource<L> {
    fn source_name(&self) -> &str {
        self.lister.name()
    }

    fn read_rows(&self) -> SourceResult<Vec<SourceRow>> {
        let keys = self.lister.list_keys()?;
        let total = keys.len();
        let values: Vec<String> = keys
            .iter()
            .filter_map(|key| self.identifier_of(key))
            .map(String::from)
            .collect();

        debug!(
            source = self.lister.name(),
            keys = total,
            documents = values.len(),
            "read object listing"
        );
        Ok(SourceRow::numbered(self.lister.name(), values))
    }

    fn format_name(&self) -> &'static str {
        "listing"
    }
}
