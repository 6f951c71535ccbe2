//! Task manifest items

use serde::{Deserialize, Serialize};

/// One unit of outstanding work for the fetch pipeline.
///
/// Serialized as `{"doi": ..., "validator": ...}`, the manifest format the
/// fetch pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskItem {
    #[serde(rename = "doi", alias = "identifier")]
    pub identifier: String,
    #[serde(rename = "validator", alias = "registrant_prefix")]
    pub registrant_prefix: String,
}

impl TaskItem {
    pub fn new(identifier: impl Into<String>, registrant_prefix: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            registrant_prefix: registrant_prefix.into(),
        }
    }
}
