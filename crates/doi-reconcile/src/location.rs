//! Source rows and provenance records

use serde::{Deserialize, Serialize};

/// One row of a source feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Name of the source (file name, bucket, manifest)
    pub source: String,
    /// Row number within the source
    pub row: u64,
    /// Raw cell value, `None` when the cell is absent
    pub value: Option<String>,
}

impl SourceRow {
    pub fn new(source: impl Into<String>, row: u64, value: Option<String>) -> Self {
        Self {
            source: source.into(),
            row,
            value,
        }
    }

    /// Build a feed from plain values, numbering rows from 1
    pub fn numbered<I, S>(source: &str, values: I) -> Vec<SourceRow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| SourceRow::new(source, i as u64 + 1, Some(value.into())))
            .collect()
    }

    pub fn location(&self) -> Location {
        Location::new(self.source.clone(), self.row)
    }
}

/// Where an identifier occurrence was observed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "file")]
    pub source: String,
    pub row: u64,
}

impl Location {
    pub fn new(source: impl Into<String>, row: u64) -> Self {
        Self {
            source: source.into(),
            row,
        }
    }
}

/// Why a row produced no identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MissingReason {
    /// The cell was absent
    Absent,
    /// The cell was empty or whitespace
    Blank,
    /// The cell had text that did not normalize
    Unusable { raw: String },
}

/// A row with no usable identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRecord {
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub reason: MissingReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_rows_start_at_one() {
        let rows = SourceRow::numbered("listing", ["10.1/a", "10.2/b"]);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].value.as_deref(), Some("10.2/b"));
    }

    #[test]
    fn missing_record_serializes_flat() {
        let record = MissingRecord {
            location: Location::new("a.csv", 4),
            reason: MissingReason::Blank,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"file": "a.csv", "row": 4, "reason": "blank"})
        );
    }

    #[test]
    fn unusable_record_keeps_raw_value() {
        let record = MissingRecord {
            location: Location::new("a.csv", 2),
            reason: MissingReason::Unusable {
                raw: "n/a?".into(),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["reason"], "unusable");
        assert_eq!(json["raw"], "n/a?");
    }
}
