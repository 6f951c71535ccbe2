//! Task manifests and downloaded-set lists

use crate::error::{SourceError, SourceResult};
use crate::reader::FeedReader;
use doi_reconcile::{SourceRow, TaskItem};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

fn read_json<T: DeserializeOwned>(path: &Path) -> SourceResult<T> {
    if !path.is_file() {
        return Err(SourceError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SourceError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read a task manifest (`[{"doi": ..., "validator": ...}, ...]`)
pub fn read_manifest(path: impl AsRef<Path>) -> SourceResult<Vec<TaskItem>> {
    read_json(path.as_ref())
}

/// Read a JSON array of identifier strings
pub fn read_string_list(path: impl AsRef<Path>) -> SourceResult<Vec<String>> {
    read_json(path.as_ref())
}

/// A JSON list of identifiers as a feed, rows numbered from 1
pub struct StringListSource {
    path: PathBuf,
    name: String,
}

impl StringListSource {
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

impl FeedReader for StringListSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_rows(&self) -> SourceResult<Vec<SourceRow>> {
        Ok(SourceRow::numbered(&self.name, read_string_list(&self.path)?))
    }

    fn format_name(&self) -> &'static str {
        "JSON list"
    }
}
