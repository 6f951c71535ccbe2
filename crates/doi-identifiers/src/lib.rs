//! Identifier normalization for bibliographic DOIs
//!
//! This crate turns raw identifier strings, as they appear in export files,
//! object-store listings and task manifests, into stable comparison keys:
//! - Resolver URL prefix stripping (`https://doi.org/...`, `doi:...`)
//! - Whitespace trimming and Unicode NFC normalization
//! - Optional case folding
//! - Registrant prefix extraction (`10.1016` from `10.1016/j.x.2024.1`)
//! - Canonical display forms and file-name-safe prefix escaping

pub mod error;
pub mod identifier;
pub mod normalizer;
pub mod registrant;

pub use error::*;
pub use identifier::*;
pub use normalizer::*;
pub use registrant::*;
