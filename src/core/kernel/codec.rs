use crate::core::errors::DamError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body expected to hold a single JSON object.
///
/// An empty body is a decode failure for this shape; missing required fields
/// surface through serde's error message, which names the field.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, DamError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(DamError::Decode(
            "empty body where a JSON object was expected".to_string(),
        ));
    }
    serde_json::from_str(trimmed).map_err(|e| DamError::Decode(e.to_string()))
}

/// Decode a response body expected to hold a JSON array.
///
/// Each element is decoded independently; the first malformed element aborts
/// the whole call with its index, and no partial list is returned. An empty
/// body decodes as zero results.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, DamError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let elements: Vec<Value> =
        serde_json::from_str(trimmed).map_err(|e| DamError::Decode(e.to_string()))?;

    elements
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| DamError::DecodeAt {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
