//! Error types for doi-tasks

use doi_identifiers::IdentifierError;
use doi_sources::SourceError;
use thiserror::Error;

/// Result type alias for command execution
pub type Result<T> = std::result::Result<T, CliError>;

/// Main error type for the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    /// A source could not be read or an output could not be written
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Normalizer configuration was rejected
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Configuration file could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}
