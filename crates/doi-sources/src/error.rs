//! Source read failures

use thiserror::Error;

/// Errors that can occur while reading or writing a source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Invalid format in {path}: {message}")]
    InvalidFormat { path: String, message: String },

    #[error("Unsupported format {format:?} for {path}")]
    UnsupportedFormat { path: String, format: String },

    #[error("Column {column:?} not found in {path}")]
    ColumnNotFound { path: String, column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {path}: {message}")]
    Json { path: String, message: String },
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;
