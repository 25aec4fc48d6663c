//! JSON document decoding.
//!
//! Catalog files hold one object each while log files hold one object per
//! line; both are read as a stream of whitespace-separated values. A
//! top-level array is flattened into its elements.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Deserializer, Value};

use crate::error::{IngestError, Result};

/// Decodes every record in `text`, applying field-name overrides first.
///
/// `overrides` maps canonical field names to the names used by the source;
/// a source field found under its override name is moved to the canonical
/// name before the record is decoded.
pub fn decode_documents<T: DeserializeOwned>(
    path: &Path,
    text: &str,
    overrides: &BTreeMap<String, String>,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    let mut index = 0usize;

    for value in Deserializer::from_str(text).into_iter::<Value>() {
        let value = value.map_err(|source| IngestError::Decode {
            path: path.to_path_buf(),
            record: index,
            source,
        })?;
        let values = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        for value in values {
            let value = apply_overrides(value, overrides);
            let record = serde_json::from_value(value).map_err(|source| IngestError::Decode {
                path: path.to_path_buf(),
                record: index,
                source,
            })?;
            records.push(record);
            index += 1;
        }
    }

    Ok(records)
}

fn apply_overrides(value: Value, overrides: &BTreeMap<String, String>) -> Value {
    if overrides.is_empty() {
        return value;
    }
    let Value::Object(mut object) = value else {
        return value;
    };
    for (canonical, source) in overrides {
        if let Some(field) = object.remove(source) {
            object.insert(canonical.clone(), field);
        }
    }
    Value::Object(object)
}
