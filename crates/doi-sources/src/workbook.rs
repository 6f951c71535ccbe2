//! Spreadsheet workbook reader (XLS / XLSX / ODS)
//!
//! Citation databases such as Web of Science export `savedrecs.xls`
//! workbooks. The first worksheet is read; its first row holds the headers.
//! Row numbers match the spreadsheet, so the header row of a sheet that
//! starts at A1 is row 1 and the first record is row 2.
//!
//! Some exports carry an `.xls` extension but are delimited text. When the
//! file is not a workbook it is read as tab- or comma-delimited text instead.

use crate::error::{SourceError, SourceResult};
use crate::reader::FeedReader;
use crate::tabular::{TabularConfig, TabularSource};
use calamine::{open_workbook_auto, Data, Reader};
use doi_reconcile::SourceRow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Workbook file reader
pub struct WorkbookSource {
    path: PathBuf,
    name: String,
    column: String,
}

impl WorkbookSource {
    pub fn open(path: impl AsRef<Path>, config: &TabularConfig) -> SourceResult<Self> {
        let path = path.as_ref();
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
            column: config.column.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sheet(
        &self,
        mut workbook: calamine::Sheets<BufReader<File>>,
    ) -> SourceResult<Vec<SourceRow>> {
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| self.invalid("workbook has no worksheets"))?
            .map_err(|e| self.invalid(e))?;

        // absolute sheet row of the header, 0-based
        let header_row = range.start().map(|(row, _)| u64::from(row)).unwrap_or(0);
        let mut sheet_rows = range.rows();

        let col_index = sheet_rows
            .next()
            .and_then(|header| {
                header.iter().position(|cell| {
                    cell.to_string().trim_start_matches('\u{feff}').trim() == self.column
                })
            })
            .ok_or_else(|| SourceError::ColumnNotFound {
                path: self.path.display().to_string(),
                column: self.column.clone(),
            })?;

        let rows: Vec<SourceRow> = sheet_rows
            .enumerate()
            .map(|(i, cells)| {
                let value = cells.get(col_index).and_then(|cell| match cell {
                    Data::Empty => None,
                    cell => Some(cell.to_string()),
                });
                SourceRow::new(self.name.clone(), header_row + i as u64 + 2, value)
            })
            .collect();

        debug!(source = %self.name, rows = rows.len(), "read workbook source");
        Ok(rows)
    }

    /// Read a mislabelled text export, sniffing the delimiter from the header
    fn read_delimited(&self) -> SourceResult<Vec<SourceRow>> {
        let file = File::open(&self.path).map_err(|e| SourceError::OpenFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut header = String::new();
        BufReader::new(file).read_line(&mut header)?;
        let delimiter = if header.contains('\t') { b'\t' } else { b',' };

        TabularSource::open_with_options(&self.path, &self.column, delimiter)?.read_rows()
    }

    fn invalid(&self, message: impl ToString) -> SourceError {
        SourceError::InvalidFormat {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl FeedReader for WorkbookSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_rows(&self) -> SourceResult<Vec<SourceRow>> {
        match open_workbook_auto(&self.path) {
            Ok(workbook) => self.read_sheet(workbook),
            Err(e) => {
                warn!(source = %self.name, error = %e, "not a workbook, reading as text");
                self.read_delimited()
            }
        }
    }

    fn format_name(&self) -> &'static str {
        "Workbook"
    }
}
