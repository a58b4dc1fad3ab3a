//! Record count for JSON documents

use crate::error::{DecodeError, Result};
use serde_json::Value;

/// Number of elements in the array under `key`, 0 if the key is absent
///
/// The document must be a JSON object. A present key that does not hold an array is a
/// decode error.
pub fn count_records(content: &str, key: &str) -> Result<usize> {
    let value: Value = serde_json::from_str(content).map_err(DecodeError::Json)?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(DecodeError::Structure {
                reason: format!("expected a top-level object, found {}", type_name(&other)),
            }
            .into());
        }
    };

    match map.get(key) {
        None => Ok(0),
        Some(Value::Array(records)) => Ok(records.len()),
        Some(other) => Err(DecodeError::Structure {
            reason: format!("expected '{key}' to be an array, found {}", type_name(other)),
        }
        .into()),
    }
}

/// `Number of records` line
pub fn summarize(content: &str, key: &str) -> Result<String> {
    Ok(format!("Number of records: {}\n", count_records(content, key)?))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
