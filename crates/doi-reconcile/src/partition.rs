//! Registrant partitioning of outstanding identifiers
//!
//! Identifiers are bucketed by registrant prefix (`10.1016`, `10.3390`, ...),
//! buckets are ranked by size, and each bucket becomes one task batch for
//! the fetch pipeline.

use crate::task::TaskItem;
use doi_identifiers::{
    canonical_form, registrant_prefix, sanitize_prefix, Identifier, IdentifierError,
    NormalizedKey, DEFAULT_UNSAFE_CHARS,
};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Partitioning options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Characters replaced with `_` in task file names
    pub unsafe_chars: String,
    /// Split groups larger than this into several batches (`None` or 0 = no limit)
    pub max_batch_size: Option<usize>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            unsafe_chars: DEFAULT_UNSAFE_CHARS.to_string(),
            max_batch_size: None,
        }
    }
}

/// Distinct identifiers sharing a registrant prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrantGroup {
    prefix: String,
    identifiers: Vec<Identifier>,
}

impl RegistrantGroup {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Identifiers in first-seen order
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn count(&self) -> usize {
        self.identifiers.len()
    }

    /// First identifier seen for this prefix
    pub fn representative(&self) -> &Identifier {
        &self.identifiers[0]
    }
}

/// An identifier excluded from grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedItem {
    pub identifier: Identifier,
    pub error: IdentifierError,
}

/// Serializes as `{"doi": <key>, "error": <message>}`
impl Serialize for MalformedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MalformedItem", 2)?;
        state.serialize_field("doi", self.identifier.key())?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Output of [`group_by_prefix`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Groups in order of first appearance
    pub groups: Vec<RegistrantGroup>,
    pub malformed: Vec<MalformedItem>,
}

impl Grouping {
    /// Distinct identifiers across all groups
    pub fn total(&self) -> usize {
        self.groups.iter().map(RegistrantGroup::count).sum()
    }
}

/// Bucket identifiers by registrant prefix in a single pass.
///
/// Within a group identifiers are deduplicated by key; the first occurrence
/// is kept. Identifiers without a usable prefix land in
/// [`Grouping::malformed`].
pub fn group_by_prefix(items: &[Identifier]) -> Grouping {
    let mut grouping = Grouping::default();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut seen: Vec<HashSet<NormalizedKey>> = Vec::new();

    for item in items {
        let prefix = match registrant_prefix(item.key()) {
            Ok(prefix) => prefix,
            Err(error) => {
                grouping.malformed.push(MalformedItem {
                    identifier: item.clone(),
                    error,
                });
                continue;
            }
        };

        let slot = match index.get(prefix) {
            Some(&slot) => slot,
            None => {
                index.insert(prefix.to_string(), grouping.groups.len());
                grouping.groups.push(RegistrantGroup {
                    prefix: prefix.to_string(),
                    identifiers: Vec::new(),
                });
                seen.push(HashSet::new());
                grouping.groups.len() - 1
            }
        };

        if seen[slot].insert(item.key().clone()) {
            grouping.groups[slot].identifiers.push(item.clone());
        }
    }

    grouping
}

/// One line of the summary index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    #[serde(rename = "validator")]
    pub prefix: String,
    pub count: usize,
    /// Canonical form of the group's representative
    #[serde(rename = "doi")]
    pub example: String,
}

/// Groups ranked by count descending, then prefix ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryIndex {
    pub entries: Vec<SummaryEntry>,
}

impl SummaryIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `n` entries, for progress output
    pub fn top(&self, n: usize) -> &[SummaryEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Groups sorted by count descending, then prefix ascending
fn ranked_groups(grouping: &Grouping) -> Vec<&RegistrantGroup> {
    let mut groups: Vec<&RegistrantGroup> = grouping.groups.iter().collect();
    groups.sort_by(|a, b| (Reverse(a.count()), &a.prefix).cmp(&(Reverse(b.count()), &b.prefix)));
    groups
}

/// Rank groups deterministically, independent of the input order.
///
/// Each entry's example is the canonical form of the group's
/// representative under `base_url`, the same form task items use.
pub fn rank(grouping: &Grouping, base_url: &str) -> SummaryIndex {
    let entries = ranked_groups(grouping)
        .into_iter()
        .map(|group| SummaryEntry {
            prefix: group.prefix.clone(),
            count: group.count(),
            example: canonical_form(group.representative().key(), base_url),
        })
        .collect();
    SummaryIndex { entries }
}

/// Task items for one registrant prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBatch {
    pub prefix: String,
    /// 1-based part number when a group was split
    pub part: Option<usize>,
    pub items: Vec<TaskItem>,
}

impl TaskBatch {
    /// `task_<prefix>.json`, or `task_<prefix>_part<N>.json` for split groups
    pub fn file_name(&self, unsafe_chars: &str) -> String {
        let safe = sanitize_prefix(&self.prefix, unsafe_chars);
        match self.part {
            Some(part) => format!("task_{}_part{}.json", safe, part),
            None => format!("task_{}.json", safe),
        }
    }
}

/// Emit one batch per group in ranked order.
///
/// Items keep the order they had in the group. Each item's identifier is
/// the canonical form under `base_url`.
pub fn emit_tasks(
    grouping: &Grouping,
    config: &PartitionConfig,
    base_url: &str,
) -> Vec<TaskBatch> {
    let limit = config.max_batch_size.filter(|&n| n > 0);
    let mut batches = Vec::new();

    for group in ranked_groups(grouping) {
        let items: Vec<TaskItem> = group
            .identifiers
            .iter()
            .map(|id| TaskItem::new(canonical_form(id.key(), base_url), group.prefix.clone()))
            .collect();

        match limit {
            Some(limit) if items.len() > limit => {
                for (i, chunk) in items.chunks(limit).enumerate() {
                    batches.push(TaskBatch {
                        prefix: group.prefix.clone(),
                        part: Some(i + 1),
                        items: chunk.to_vec(),
                    });
                }
            }
            _ => batches.push(TaskBatch {
                prefix: group.prefix.clone(),
                part: None,
                items,
            }),
        }
    }

    batches
}
