//! Registrant prefixes and display forms

use crate::error::{IdentifierError, Result};
use crate::identifier::NormalizedKey;

/// Characters replaced by [`sanitize_prefix`] unless configured otherwise
pub const DEFAULT_UNSAFE_CHARS: &str = "/\\:*?\"<>| ";

/// Separator between registrant prefix and suffix
pub const REGISTRANT_SEPARATOR: char = '/';

/// Get the registrant prefix of a key (`10.1016` for `10.1016/j.x.1`)
pub fn registrant_prefix(key: &NormalizedKey) -> Result<&str> {
    match key.as_str().split_once(REGISTRANT_SEPARATOR) {
        Some((prefix, _)) if !prefix.trim().is_empty() => Ok(prefix),
        _ => Err(IdentifierError::Malformed {
            key: key.as_str().to_string(),
        }),
    }
}

/// Build the fully qualified display form of a key
pub fn canonical_form(key: &NormalizedKey, base_url: &str) -> String {
    if base_url.is_empty() || base_url.ends_with('/') {
        format!("{}{}", base_url, key)
    } else {
        format!("{}/{}", base_url, key)
    }
}

/// Make a registrant prefix safe to use in a file name.
///
/// Every character in `unsafe_chars`, and every control character, becomes `_`.
pub fn sanitize_prefix(prefix: &str, unsafe_chars: &str) -> String {
    prefix
        .chars()
        .map(|c| {
            if c.is_control() || unsafe_chars.contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}
