//! Dataset record normalization.
//!
//! EDC connectors have shipped two shapes for asset properties: a legacy
//! dialect with `edc:`-prefixed keys and the current bare-key dialect.
//! Normalization migrates the legacy keys, mirrors `id`/`name` into the
//! DCAT `identifier`/`title` fields, and rewrites the single
//! `dcat:distribution` object into the `distribution` list the generic
//! converter expects.

use serde_json::{Map, Value};

use crate::error::{HarvesterError, Result};

/// Asset property keys migrated from the legacy dialect.
const LEGACY_KEYS: [&str; 5] = ["id", "name", "description", "contentType", "keyword"];

/// Dataset record dialects emitted by EDC connectors.
///
/// A record carrying `edc:id` is treated as fully legacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDialect {
    Legacy,
    Current,
}

impl RecordDialect {
    #[must_use]
    pub fn detect(record: &Map<String, Value>) -> Self {
        if record.contains_key("edc:id") {
            Self::Legacy
        } else {
            Self::Current
        }
    }
}

/// Normalize a raw dataset record into its canonical shape.
///
/// Pure mapping: consumes the raw record and returns the normalized one.
/// Unrelated keys pass through untouched. When a legacy key and its
/// unprefixed counterpart are both present, the legacy value wins.
///
/// # Errors
/// `MalformedRecord` if the record is not an object or its
/// `dcat:distribution` is absent or not an object.
pub fn normalize_dataset(record: Value) -> Result<Value> {
    let Value::Object(mut record) = record else {
        return Err(HarvesterError::MalformedRecord {
            field: "record".to_string(),
        });
    };

    if RecordDialect::detect(&record) == RecordDialect::Legacy {
        for key in LEGACY_KEYS {
            if let Some(value) = record.remove(&format!("edc:{key}")) {
                record.insert(key.to_string(), value);
            }
        }
    }

    let id = record.get("id").cloned().unwrap_or(Value::Null);
    let name = record.get("name").cloned().unwrap_or(Value::Null);
    record.insert("identifier".to_string(), id.clone());
    record.insert("title".to_string(), name);

    let Some(Value::Object(mut distribution)) = record.remove("dcat:distribution") else {
        return Err(HarvesterError::MalformedRecord {
            field: "dcat:distribution".to_string(),
        });
    };
    distribution.insert("title".to_string(), id);
    distribution.insert(
        "format".to_string(),
        record.get("contentType").cloned().unwrap_or(Value::Null),
    );
    record.insert(
        "distribution".to_string(),
        Value::Array(vec![Value::Object(distribution)]),
    );

    if record.get("keyword").is_some_and(|keyword| !keyword.is_array()) {
        if let Some(keyword) = record.remove("keyword") {
            record.insert("keyword".to_string(), Value::Array(vec![keyword]));
        }
    }

    Ok(Value::Object(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn normalize(record: Value) -> Value {
        normalize_dataset(record).unwrap()
    }

    #[test]
    fn test_detect_dialect() {
        let legacy = json!({"edc:id": "a"});
        let current = json!({"id": "a"});
        assert_eq!(
            RecordDialect::detect(legacy.as_object().unwrap()),
            RecordDialect::Legacy
        );
        assert_eq!(
            RecordDialect::detect(current.as_object().unwrap()),
            RecordDialect::Current
        );
    }

    #[test]
    fn test_normalize_current_dialect() {
        let record = normalize(json!({
            "id": "asset-1",
            "name": "Traffic counts",
            "contentType": "text/csv",
            "dcat:distribution": {"accessURL": "https://provider.example/data"}
        }));

        assert_eq!(record["identifier"], json!("asset-1"));
        assert_eq!(record["title"], json!("Traffic counts"));
        assert_eq!(
            record["distribution"],
            json!([{
                "accessURL": "https://provider.example/data",
                "title": "asset-1",
                "format": "text/csv"
            }])
        );
        assert!(record.get("dcat:distribution").is_none());
    }

    #[test]
    fn test_normalize_legacy_dialect() {
        let record = normalize(json!({
            "edc:id": "asset-2",
            "edc:name": "Air quality",
            "edc:description": "Daily readings",
            "edc:contentType": "application/json",
            "edc:keyword": "environment",
            "dcat:distribution": {}
        }));

        assert_eq!(record["id"], json!("asset-2"));
        assert_eq!(record["name"], json!("Air quality"));
        assert_eq!(record["description"], json!("Daily readings"));
        assert_eq!(record["contentType"], json!("application/json"));
        assert_eq!(record["identifier"], json!("asset-2"));
        assert_eq!(record["title"], json!("Air quality"));
        assert_eq!(record["keyword"], json!(["environment"]));
        for key in LEGACY_KEYS {
            assert!(record.get(format!("edc:{key}")).is_none());
        }
    }

    #[test]
    fn test_normalize_legacy_wins_over_current() {
        let record = normalize(json!({
            "edc:id": "legacy-id",
            "id": "current-id",
            "edc:name": "Legacy name",
            "name": "Current name",
            "dcat:distribution": {}
        }));

        assert_eq!(record["id"], json!("legacy-id"));
        assert_eq!(record["name"], json!("Legacy name"));
        assert_eq!(record["identifier"], json!("legacy-id"));
    }

    #[test]
    fn test_normalize_leaves_unrelated_keys_untouched() {
        let record = normalize(json!({
            "edc:id": "asset-3",
            "edc:custom": "kept as is",
            "version": 7,
            "dcat:distribution": {}
        }));

        assert_eq!(record["edc:custom"], json!("kept as is"));
        assert_eq!(record["version"], json!(7));
    }

    #[test]
    fn test_normalize_keyword_scalar_wrapped() {
        let record = normalize(json!({
            "id": "a",
            "keyword": "mobility",
            "dcat:distribution": {}
        }));
        assert_eq!(record["keyword"], json!(["mobility"]));
    }

    #[test]
    fn test_normalize_keyword_list_unchanged() {
        let record = normalize(json!({
            "id": "a",
            "keyword": ["mobility", "traffic"],
            "dcat:distribution": {}
        }));
        assert_eq!(record["keyword"], json!(["mobility", "traffic"]));
    }

    #[test]
    fn test_normalize_missing_distribution_fails() {
        let err = normalize_dataset(json!({"id": "a"})).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MalformedRecord { ref field } if field == "dcat:distribution"
        ));
    }

    #[test]
    fn test_normalize_non_object_distribution_fails() {
        let err = normalize_dataset(json!({"id": "a", "dcat:distribution": "x"})).unwrap_err();
        assert!(matches!(err, HarvesterError::MalformedRecord { .. }));
    }

    #[test]
    fn test_normalize_non_object_record_fails() {
        let err = normalize_dataset(json!(["a"])).unwrap_err();
        assert!(matches!(err, HarvesterError::MalformedRecord { .. }));
    }

    #[test]
    fn test_normalize_missing_id_and_name_become_null() {
        let record = normalize(json!({"dcat:distribution": {}}));
        assert_eq!(record["identifier"], Value::Null);
        assert_eq!(record["title"], Value::Null);
    }
}
