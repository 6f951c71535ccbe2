//! Cross-source set operations
//!
//! Every operation returns new values; input collections are never mutated.
//! Order-sensitive operations keep the order of their *first* argument, so
//! results do not depend on how the second collection was enumerated.

use crate::collection::IdentifierCollection;
use crate::location::Location;
use crate::task::TaskItem;
use doi_identifiers::{Identifier, NormalizedKey, Normalizer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeSet;

/// Distinct keys of a collection, sorted ascending
pub fn unique_keys(collection: &IdentifierCollection) -> Vec<NormalizedKey> {
    collection
        .identifiers()
        .map(|id| id.key().clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A duplicated identifier and all of its locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub identifier: Identifier,
    pub locations: Vec<Location>,
}

/// Identifiers seen more than once, in discovery order.
///
/// Serializes as a JSON object `{ "<key>": [locations...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub entries: Vec<DuplicateEntry>,
}

impl DuplicateReport {
    /// Number of distinct duplicated identifiers
    pub fn kinds(&self) -> usize {
        self.entries.len()
    }

    /// Occurrences beyond the first, summed over all duplicated identifiers
    pub fn extra_occurrences(&self) -> usize {
        self.entries.iter().map(|e| e.locations.len() - 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DuplicateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.identifier.key().as_str(), &entry.locations)?;
        }
        map.end()
    }
}

/// Report entries whose location list has more than one element
pub fn duplicates(collection: &IdentifierCollection) -> DuplicateReport {
    let entries = collection
        .iter()
        .filter(|entry| entry.is_duplicate())
        .map(|entry| DuplicateEntry {
            identifier: entry.identifier().clone(),
            locations: entry.locations().to_vec(),
        })
        .collect();
    DuplicateReport { entries }
}

/// Items of `primary` whose key is not in `exclude`, in `primary` order
pub fn difference(primary: &[Identifier], exclude: &IdentifierCollection) -> Vec<Identifier> {
    primary
        .iter()
        .filter(|id| !exclude.contains_key(id.key()))
        .cloned()
        .collect()
}

/// Items of `base` whose key is in `pool`, in `base` order
pub fn filter_intersection(base: &[Identifier], pool: &IdentifierCollection) -> Vec<Identifier> {
    base.iter()
        .filter(|id| pool.contains_key(id.key()))
        .cloned()
        .collect()
}

/// Merge collections into a new one.
///
/// Keys keep their first-seen order across the inputs (taken in argument
/// order) and locations are concatenated in the same order, so merging
/// per-file collections gives the same result as collecting all files in
/// one pass.
pub fn union<'a, I>(collections: I) -> IdentifierCollection
where
    I: IntoIterator<Item = &'a IdentifierCollection>,
{
    let mut merged = IdentifierCollection::new();
    for collection in collections {
        for entry in collection {
            for location in entry.locations() {
                merged.record(entry.identifier(), location.clone());
            }
        }
    }
    merged
}

/// Result of [`difference_tasks`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDifference {
    /// Tasks still outstanding, in manifest order
    pub remaining: Vec<TaskItem>,
    /// Tasks whose identifier no longer normalizes (also kept in `remaining`)
    pub unusable: Vec<TaskItem>,
}

/// Manifest-level [`difference`]: tasks whose identifier is not in `exclude`
pub fn difference_tasks(
    tasks: &[TaskItem],
    normalizer: &Normalizer,
    exclude: &IdentifierCollection,
) -> TaskDifference {
    let mut out = TaskDifference::default();
    for task in tasks {
        match normalizer.normalize_key(&task.identifier) {
            Ok(key) if exclude.contains_key(&key) => {}
            Ok(_) => out.remaining.push(task.clone()),
            Err(_) => {
                out.unusable.push(task.clone());
                out.remaining.push(task.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::collect;
    use crate::location::SourceRow;

    fn collection(source: &str, values: &[&str]) -> IdentifierCollection {
        collect(
            &Normalizer::default(),
            SourceRow::numbered(source, values.iter().copied()),
        )
        .collection
    }

    fn ids(values: &[&str]) -> Vec<Identifier> {
        let n = Normalizer::default();
        values.iter().map(|v| n.normalize(v).unwrap()).collect()
    }

    fn keys(items: &[Identifier]) -> Vec<&str> {
        items.iter().map(|i| i.key().as_str()).collect()
    }

    #[test]
    fn test_unique_keys_sorted() {
        let c = collection("s", &["10.2/b", "10.1/a", "10.2/b"]);
        let unique: Vec<String> = unique_keys(&c).into_iter().map(|k| k.into_string()).collect();
        assert_eq!(unique, vec!["10.1/a", "10.2/b"]);
    }

    #[test]
    fn test_duplicates_report() {
        let c = collection("s", &["10.1/a", "10.2/b", "10.1/a ", "https://doi.org/10.1/a"]);
        let report = duplicates(&c);
        assert_eq!(report.kinds(), 1);
        assert_eq!(report.extra_occurrences(), 2);
        assert_eq!(report.entries[0].locations.len(), 3);
        // the collection itself is unchanged
        assert_eq!(c.occurrences(), 4);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["10.1/a"].as_array().unwrap().len(), 3);
        assert_eq!(json["10.1/a"][0], serde_json::json!({"file": "s", "row": 1}));
    }

    #[test]
    fn test_difference_keeps_primary_order() {
        let all = ids(&["10.3/c", "10.1/a", "10.2/b", "10.4/d"]);
        let downloaded = collection("dl", &["10.4/d", "https://doi.org/10.1/a"]);
        assert_eq!(keys(&difference(&all, &downloaded)), vec!["10.3/c", "10.2/b"]);
    }

    #[test]
    fn test_filter_intersection_keeps_base_order() {
        let base = ids(&["10.3/c", "10.1/a", "10.2/b"]);
        let pool = collection("xls", &["10.2/b", "10.3/c"]);
        assert_eq!(keys(&filter_intersection(&base, &pool)), vec!["10.3/c", "10.2/b"]);
    }

    #[test]
    fn test_union_matches_single_pass() {
        let first = collection("a", &["10.1/a", "10.2/b"]);
        let second = collection("b", &["10.2/b", "10.3/c"]);
        let merged = union([&first, &second]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.occurrences(), 4);
        let keys: Vec<&str> = merged.identifiers().map(|i| i.key().as_str()).collect();
        assert_eq!(keys, vec!["10.1/a", "10.2/b", "10.3/c"]);

        let b = merged.get(first.identifiers().nth(1).unwrap().key()).unwrap();
        assert_eq!(b.locations(), &[Location::new("a", 2), Location::new("b", 1)]);
    }

    #[test]
    fn test_difference_tasks() {
        let tasks = vec![
            TaskItem::new("https://doi.org/10.1/a", "10.1"),
            TaskItem::new("https://doi.org/10.2/b", "10.2"),
            TaskItem::new("", "10.9"),
            TaskItem::new("https://doi.org/10.3/c", "10.3"),
        ];
        let downloaded = collection("dl", &["10.2/b"]);
        let diff = difference_tasks(&tasks, &Normalizer::default(), &downloaded);

        let remaining: Vec<&str> = diff.remaining.iter().map(|t| t.identifier.as_str()).collect();
        assert_eq!(
            remaining,
            vec!["https://doi.org/10.1/a", "", "https://doi.org/10.3/c"]
        );
        assert_eq!(diff.unusable, vec![TaskItem::new("", "10.9")]);
    }
}
