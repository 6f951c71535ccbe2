//! Normalized identifier keys

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable comparison key produced by [`crate::Normalizer::normalize`].
///
/// Keys are only created by the normalizer, so every key is non-empty and
/// contains at least one `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub(crate) fn new(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A normalized key plus the display form it was first seen with.
///
/// Equality and hashing look at the key only: `10.1/a` and
/// `https://doi.org/10.1/a` are the same identifier.
#[derive(Debug, Clone)]
pub struct Identifier {
    key: NormalizedKey,
    display: String,
}

impl Identifier {
    pub(crate) fn new(key: NormalizedKey, display: String) -> Self {
        Self { key, display }
    }

    pub fn key(&self) -> &NormalizedKey {
        &self.key
    }

    /// The trimmed raw value this identifier was built from
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn into_key(self) -> NormalizedKey {
        self.key
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key.as_str())
    }
}

/// Identifiers serialize as their normalized key
impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key.as_str())
    }
}
