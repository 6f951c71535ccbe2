//! Error types for identifier handling

use thiserror::Error;

/// Result type alias for identifier operations
pub type Result<T> = std::result::Result<T, IdentifierError>;

/// Errors raised while normalizing or decomposing identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Raw value is empty or unusable after normalization
    #[error("Invalid identifier: {raw:?}")]
    Invalid { raw: String },

    /// Normalized key has no registrant separator
    #[error("Malformed identifier (no registrant prefix): {key:?}")]
    Malformed { key: String },

    /// Normalizer configuration rejected
    #[error("Invalid normalizer configuration: {0}")]
    InvalidConfig(String),
}
