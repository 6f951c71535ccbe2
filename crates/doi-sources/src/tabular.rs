//! Tabular export reader (CSV / TSV) and per-file format dispatch
//!
//! Bibliographic databases export records as delimited text or workbooks
//! with one column holding the DOI. Rows are numbered the way a spreadsheet
//! shows them: the header is row 1 and the first record is row 2.

use crate::error::{SourceError, SourceResult};
use crate::reader::{BoxedFeedReader, FeedReader};
use doi_reconcile::SourceRow;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for tabular sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularConfig {
    /// Header of the identifier column
    pub column: String,
    /// File extensions picked up by [`scan_dir`] (lowercase, no dot).
    /// Workbook extensions are read by `WorkbookSource`.
    pub extensions: Vec<String>,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            column: "DOI".to_string(),
            extensions: ["csv", "tsv", "txt", "xls", "xlsx"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Tabular file reader
pub struct TabularSource {
    path: PathBuf,
    name: String,
    column: String,
    delimiter: u8,
}

impl TabularSource {
    /// Open a tabular file; the delimiter follows the extension
    pub fn open(path: impl AsRef<Path>, config: &TabularConfig) -> SourceResult<Self> {
        let path = path.as_ref();
        let delimiter = match extension_of(path).as_str() {
            "tsv" | "txt" | "tab" => b'\t',
            _ => b',',
        };
        Self::open_with_options(path, &config.column, delimiter)
    }

    /// Open a tabular file with an explicit delimiter
    pub fn open_with_options(path: &Path, column: &str, delimiter: u8) -> SourceResult<Self> {
        if !path.exists() {
            return Err(SourceError::FileNotFound(path.display().to_string()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            column: column.to_string(),
            delimiter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> SourceResult<csv::Reader<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| SourceError::OpenFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file)))
    }

    fn invalid(&self, message: impl ToString) -> SourceError {
        SourceError::InvalidFormat {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl FeedReader for TabularSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_rows(&self) -> SourceResult<Vec<SourceRow>> {
        let mut reader = self.reader()?;

        let col_index = reader
            .headers()
            .map_err(|e| self.invalid(e))?
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == self.column)
            .ok_or_else(|| SourceError::ColumnNotFound {
                path: self.path.display().to_string(),
                column: self.column.clone(),
            })?;

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| self.invalid(e))?;
            rows.push(SourceRow::new(
                self.name.clone(),
                i as u64 + 2,
                record.get(col_index).map(|s| s.to_string()),
            ));
        }

        debug!(source = %self.name, rows = rows.len(), "read tabular source");
        Ok(rows)
    }

    fn format_name(&self) -> &'static str {
        if self.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        }
    }
}

/// Extensions read as workbooks (lowercase, no dot)
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// Open a source file with the reader its extension calls for.
///
/// Workbook files need the `workbook` feature; without it they fail with
/// [`SourceError::UnsupportedFormat`] so callers count them as failed.
pub fn open_feed(
    path: impl AsRef<Path>,
    config: &TabularConfig,
) -> SourceResult<BoxedFeedReader> {
    let path = path.as_ref();
    let extension = extension_of(path);
    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        #[cfg(feature = "workbook")]
        return Ok(Box::new(crate::workbook::WorkbookSource::open(path, config)?));

        #[cfg(not(feature = "workbook"))]
        return Err(SourceError::UnsupportedFormat {
            path: path.display().to_string(),
            format: extension,
        });
    }
    Ok(Box::new(TabularSource::open(path, config)?))
}

/// List the tabular files of a directory, sorted by file name
pub fn scan_dir(dir: impl AsRef<Path>, config: &TabularConfig) -> SourceResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SourceError::FileNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && config.extensions.contains(&extension_of(&path)) {
            files.push(path);
        }
    }
    files.sort();

    debug!(dir = %dir.display(), files = files.len(), "scanned tabular directory");
    Ok(files)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
