//! Insertion-ordered identifier collections

use crate::location::Location;
use doi_identifiers::{Identifier, NormalizedKey};
use std::collections::HashMap;

/// One identifier and every place it was seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    identifier: Identifier,
    locations: Vec<Location>,
}

impl CollectionEntry {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Locations in discovery order; never empty
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn is_duplicate(&self) -> bool {
        self.locations.len() > 1
    }
}

/// Mapping identifier → locations, iterated in discovery order.
///
/// Keys are unique by normalized key. Collections are built by
/// [`crate::collect`] or [`crate::union`] and are read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdentifierCollection {
    entries: Vec<CollectionEntry>,
    index: HashMap<NormalizedKey, usize>,
}

impl IdentifierCollection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence, creating the entry on first sight
    pub(crate) fn record(&mut self, identifier: &Identifier, location: Location) {
        if let Some(&i) = self.index.get(identifier.key()) {
            self.entries[i].locations.push(location);
            return;
        }
        self.index.insert(identifier.key().clone(), self.entries.len());
        self.entries.push(CollectionEntry {
            identifier: identifier.clone(),
            locations: vec![location],
        });
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded locations across all entries
    pub fn occurrences(&self) -> usize {
        self.entries.iter().map(|e| e.locations.len()).sum()
    }

    pub fn contains_key(&self, key: &NormalizedKey) -> bool {
        self.index.contains_key(key)
    }

    /// Lookup by key text, e.g. a value that is already normalized
    pub fn contains_str(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &NormalizedKey) -> Option<&CollectionEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.iter()
    }

    /// Identifiers in discovery order
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|e| &e.identifier)
    }
}

impl<'a> IntoIterator for &'a IdentifierCollection {
    type Item = &'a CollectionEntry;
    type IntoIter = std::slice::Iter<'a, CollectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
