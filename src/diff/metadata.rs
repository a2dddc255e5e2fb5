use super::types::FieldDiffRecord;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// How a metadata field should be laid out in the comparison view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLayout {
    Unchanged,
    /// Short values, shown as a word-level diff
    Inline { old: String, new: String },
    /// At least one side spans several lines, shown as reconciled rows
    MultiLine { old: String, new: String },
}

/// Compare two metadata objects field by field, sorted by key.
///
/// Keys present on only one side are still reported, with `None` on the other.
pub fn compute_metadata_diff(
    meta1: Option<&Map<String, Value>>,
    meta2: Option<&Map<String, Value>>,
) -> Vec<FieldDiffRecord> {
    let keys: BTreeSet<&String> = meta1
        .into_iter()
        .chain(meta2)
        .flat_map(|meta| meta.keys())
        .collect();

    keys.into_iter()
        .map(|key| {
            let v1 = meta1.and_then(|m| m.get(key)).cloned();
            let v2 = meta2.and_then(|m| m.get(key)).cloned();
            let same = v1 == v2;
            FieldDiffRecord {
                key: key.clone(),
                v1,
                v2,
                same,
            }
        })
        .collect()
}

/// Stringify a metadata value for diffing
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

pub fn is_multi_line(text: &str) -> bool {
    text.contains('\n')
}

impl FieldDiffRecord {
    pub fn layout(&self) -> FieldLayout {
        if self.same {
            return FieldLayout::Unchanged;
        }

        let old = format_value(self.v1.as_ref());
        let new = format_value(self.v2.as_ref());
        if is_multi_line(&old) || is_multi_line(&new) {
            FieldLayout::MultiLine { old, new }
        } else {
            FieldLayout::Inline { old, new }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn union_of_keys_sorted() {
        let m1 = object(json!({"b": 1, "a": "x", "only_old": true}));
        let m2 = object(json!({"c": null, "a": "y", "b": 1}));

        let records = compute_metadata_diff(Some(&m1), Some(&m2));
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c", "only_old"]);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));

        assert!(!records[0].same);
        assert!(records[1].same);
        // null on one side, absent on the other
        assert_eq!(records[2].v1, None);
        assert_eq!(records[2].v2, Some(Value::Null));
        assert!(!records[2].same);
        assert_eq!(records[3].v2, None);
    }

    #[test]
    fn equality_is_structural() {
        let m1 = object(json!({"loc": {"country": "CH", "tags": [1, 2]}}));
        let m2 = object(json!({"loc": {"tags": [1, 2], "country": "CH"}}));
        let records = compute_metadata_diff(Some(&m1), Some(&m2));
        assert!(records[0].same);
    }

    #[test]
    fn missing_mapping_is_empty() {
        let m2 = object(json!({"host": "Homo sapiens"}));
        let records = compute_metadata_diff(None, Some(&m2));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].v1, None);
        assert!(compute_metadata_diff(None, None).is_empty());
    }

    #[test]
    fn rerun_is_identical() {
        let m1 = object(json!({"a": [1, 2, 3], "b": "text"}));
        let m2 = object(json!({"a": [1, 2], "c": 5}));
        assert_eq!(
            compute_metadata_diff(Some(&m1), Some(&m2)),
            compute_metadata_diff(Some(&m1), Some(&m2))
        );
    }

    #[test]
    fn value_stringification() {
        assert_eq!(format_value(None), "");
        assert_eq!(format_value(Some(&Value::Null)), "");
        assert_eq!(format_value(Some(&json!("plain"))), "plain");
        assert_eq!(format_value(Some(&json!(42))), "42");
        assert_eq!(format_value(Some(&json!(true))), "true");
        assert_eq!(format_value(Some(&json!([1, 2]))), "[\n  1,\n  2\n]");
        assert_eq!(format_value(Some(&json!({"k": "v"}))), "{\n  \"k\": \"v\"\n}");
    }

    #[test]
    fn layout_selection() {
        let multi = FieldDiffRecord {
            key: "notes".into(),
            v1: Some(json!("line1\nline2")),
            v2: Some(json!("line1")),
            same: false,
        };
        assert_eq!(
            multi.layout(),
            FieldLayout::MultiLine {
                old: "line1\nline2".into(),
                new: "line1".into()
            }
        );

        let short = FieldDiffRecord {
            key: "host".into(),
            v1: Some(json!("short")),
            v2: Some(json!("shorter")),
            same: false,
        };
        assert!(matches!(short.layout(), FieldLayout::Inline { .. }));

        let same = FieldDiffRecord {
            key: "host".into(),
            v1: Some(json!("short")),
            v2: Some(json!("short")),
            same: true,
        };
        assert_eq!(same.layout(), FieldLayout::Unchanged);

        assert!(is_multi_line("line1\nline2"));
        assert!(!is_multi_line("short"));
    }

    #[test]
    fn structured_values_are_multi_line() {
        let record = FieldDiffRecord {
            key: "authors".into(),
            v1: Some(json!(["A"])),
            v2: Some(json!(["A", "B"])),
            same: false,
        };
        assert!(matches!(record.layout(), FieldLayout::MultiLine { .. }));
    }
}
