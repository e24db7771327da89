//! Read-only record trees from nested JSON.
//!
//! Structured metadata (build or job information, for instance) usually
//! arrives as JSON objects nested in arrays nested in objects. `Record`
//! turns such a value into a tree where every object is addressable by key
//! and by dotted path:
//!
//! ```rust
//! use linestate::record::{Record, SequencePolicy};
//! use serde_json::json;
//!
//! let build = Record::from_value(
//!     json!({"number": 7, "artifacts": [{"fileName": "app.log"}]}),
//!     SequencePolicy::default(),
//! )
//! .unwrap();
//!
//! let name = build.lookup("artifacts.0.fileName").and_then(|f| f.as_str());
//! assert_eq!(name, Some("app.log"));
//! ```

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// What to do with sequence elements that are not mappings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Convert mapping elements and replace everything else with
    /// `Field::Empty`
    #[default]
    NullNonMappings,

    /// Every element must be a mapping
    RequireMappings,
}

/// Errors that can occur while converting values into records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected a mapping at {path}")]
    NotAMapping { path: String },

    #[error("element {index} of {path} is not a mapping")]
    NonMappingElement { path: String, index: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A value inside a record.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// A scalar (string, number, boolean or null)
    Value(Value),
    /// A nested mapping
    Record(Record),
    /// A sequence
    List(Vec<Field>),
    /// Placeholder for a sequence element that was not a mapping
    Empty,
}

impl Field {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_value().and_then(Value::as_u64)
    }

    pub fn is_empty_placeholder(&self) -> bool {
        matches!(self, Field::Empty)
    }
}

/// An immutable mapping from keys to fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    /// Convert a JSON value, which must be a mapping.
    pub fn from_value(value: Value, policy: SequencePolicy) -> Result<Self, RecordError> {
        match value {
            Value::Object(map) => Self::from_map(map, policy, "$"),
            _ => Err(RecordError::NotAMapping {
                path: "$".to_string(),
            }),
        }
    }

    pub fn from_json(json: &str, policy: SequencePolicy) -> Result<Self, RecordError> {
        Self::from_value(serde_json::from_str(json)?, policy)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Follow a dotted path of keys and sequence indices.
    pub fn lookup(&self, path: &str) -> Option<&Field> {
        let mut segments = path.split('.');
        let mut field = self.get(segments.next()?)?;

        for segment in segments {
            field = match field {
                Field::Record(record) => record.get(segment)?,
                Field::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                Field::Value(_) | Field::Empty => return None,
            };
        }

        Some(field)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_map(
        map: Map<String, Value>,
        policy: SequencePolicy,
        path: &str,
    ) -> Result<Self, RecordError> {
        let fields = map
            .into_iter()
            .map(|(key, value)| {
                let child = format!("{path}.{key}");
                convert(value, policy, &child).map(|field| (key, field))
            })
            .collect::<Result<BTreeMap<_, _>, RecordError>>()?;
        Ok(Self { fields })
    }
}

fn convert(value: Value, policy: SequencePolicy, path: &str) -> Result<Field, RecordError> {
    match value {
        Value::Object(map) => Record::from_map(map, policy, path).map(Field::Record),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => {
                    Record::from_map(map, policy, &format!("{path}.{index}")).map(Field::Record)
                }
                _ => match policy {
                    SequencePolicy::NullNonMappings => Ok(Field::Empty),
                    SequencePolicy::RequireMappings => Err(RecordError::NonMappingElement {
                        path: path.to_string(),
                        index,
                    }),
                },
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Field::List),
        scalar => Ok(Field::Value(scalar)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_info() -> Value {
        json!({
            "number": 42,
            "result": "SUCCESS",
            "building": false,
            "duration": null,
            "changeSet": {"kind": "git", "items": [{"commitId": "abc"}]},
            "artifacts": [
                {"fileName": "console.log", "size": 1024},
                "not-a-mapping",
                {"fileName": "junit.xml"}
            ]
        })
    }

    #[test]
    fn top_level_must_be_a_mapping() {
        let result = Record::from_value(json!([1, 2]), SequencePolicy::default());
        assert!(matches!(result, Err(RecordError::NotAMapping { ref path }) if path == "$"));
    }

    #[test]
    fn scalars_are_kept() {
        let record = Record::from_value(build_info(), SequencePolicy::default()).unwrap();

        assert_eq!(record.get("number").and_then(Field::as_u64), Some(42));
        assert_eq!(record.get("result").and_then(Field::as_str), Some("SUCCESS"));
        assert_eq!(record.get("building"), Some(&Field::Value(json!(false))));
        assert_eq!(record.get("duration"), Some(&Field::Value(Value::Null)));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn nested_mappings_become_records() {
        let record = Record::from_value(build_info(), SequencePolicy::default()).unwrap();

        let change_set = record.get("changeSet").and_then(Field::as_record).unwrap();
        assert_eq!(change_set.get("kind").and_then(Field::as_str), Some("git"));
        assert_eq!(
            record.lookup("changeSet.items.0.commitId").and_then(Field::as_str),
            Some("abc")
        );
    }

    #[test]
    fn null_policy_replaces_non_mapping_elements() {
        let record = Record::from_value(build_info(), SequencePolicy::NullNonMappings).unwrap();

        let artifacts = record.get("artifacts").and_then(Field::as_list).unwrap();
        assert_eq!(artifacts.len(), 3);
        assert!(artifacts[0].as_record().is_some());
        assert!(artifacts[1].is_empty_placeholder());
        assert_eq!(
            record.lookup("artifacts.2.fileName").and_then(Field::as_str),
            Some("junit.xml")
        );
    }

    #[test]
    fn require_policy_rejects_non_mapping_elements() {
        let result = Record::from_value(build_info(), SequencePolicy::RequireMappings);

        match result {
            Err(RecordError::NonMappingElement { path, index }) => {
                assert_eq!(path, "$.artifacts");
                assert_eq!(index, 1);
            }
            other => panic!("expected non-mapping error, got {other:?}"),
        }
    }

    #[test]
    fn require_policy_accepts_mapping_only_sequences() {
        let record = Record::from_value(
            json!({"jobs": [{"name": "a"}, {"name": "b"}]}),
            SequencePolicy::RequireMappings,
        )
        .unwrap();

        assert_eq!(record.lookup("jobs.1.name").and_then(Field::as_str), Some("b"));
    }

    #[test]
    fn nested_sequences_are_placeholders() {
        let record = Record::from_value(json!({"grid": [[1, 2], []]}), SequencePolicy::default()).unwrap();

        let grid = record.get("grid").and_then(Field::as_list).unwrap();
        assert!(grid.iter().all(Field::is_empty_placeholder));
    }

    #[test]
    fn lookup_stops_at_scalars_and_bad_indices() {
        let record = Record::from_value(build_info(), SequencePolicy::default()).unwrap();

        assert!(record.lookup("number.value").is_none());
        assert!(record.lookup("artifacts.9").is_none());
        assert!(record.lookup("artifacts.first").is_none());
        assert!(record.lookup("artifacts.1.fileName").is_none());
        assert!(record.lookup("").is_none());
    }

    #[test]
    fn keys_are_sorted() {
        let record = Record::from_value(json!({"b": 1, "a": 2}), SequencePolicy::default()).unwrap();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn from_json_reports_syntax_errors() {
        assert!(matches!(
            Record::from_json("{", SequencePolicy::default()),
            Err(RecordError::Json(_))
        ));
    }
}
