//! Dataset extraction from a fetched catalog document.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{HarvesterError, Result};

/// Split a catalog document into `(guid, serialized record)` pairs.
///
/// The document is either a bare list of dataset records, or a catalog
/// object carrying `dcat:dataset` (one record or a list) and optionally a
/// shared `dcat:service` descriptor. Every returned record is standalone:
/// the service descriptor is cloned into each record, so mutating one
/// record downstream cannot touch its siblings.
///
/// A record without an `id` field gets a digest of its serialized bytes
/// as identifier. That is an upstream data-quality problem and is logged
/// as a warning.
///
/// # Errors
/// `InvalidDocument` if the document is neither a list nor an object, or
/// if a dataset entry is not an object.
pub fn guids_and_datasets(content: &str) -> Result<Vec<(String, String)>> {
    let doc: Value = serde_json::from_str(content)?;

    let (datasets, service) = match doc {
        Value::Array(datasets) => (datasets, None),
        Value::Object(mut catalog) => {
            let service = catalog.remove("dcat:service");
            let datasets = match catalog.remove("dcat:dataset") {
                Some(Value::Array(datasets)) => datasets,
                Some(dataset @ Value::Object(_)) => vec![dataset],
                Some(_) | None => Vec::new(),
            };
            (datasets, service)
        }
        _ => {
            return Err(HarvesterError::InvalidDocument(
                "expected a dataset list or a catalog object".to_string(),
            ))
        }
    };

    let mut pairs = Vec::with_capacity(datasets.len());
    for mut dataset in datasets {
        let Some(record) = dataset.as_object_mut() else {
            return Err(HarvesterError::InvalidDocument(
                "dataset entry is not an object".to_string(),
            ));
        };
        if let Some(service) = &service {
            record.insert("dcat:service".to_string(), service.clone());
        }

        let as_string = serde_json::to_string(&dataset)?;
        // An empty id counts as missing; scalar non-string ids are kept
        // as their text form
        let guid = match dataset.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(id @ (Value::Number(_) | Value::Bool(_))) => id.to_string(),
            _ => {
                let digest = hex::encode(Sha256::digest(as_string.as_bytes()));
                tracing::warn!(
                    guid = %digest,
                    "Dataset has no usable 'id' field, falling back to content digest"
                );
                digest
            }
        };
        pairs.push((guid, as_string));
    }

    Ok(pairs)
}
