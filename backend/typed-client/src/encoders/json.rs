use super::dispatch::{Target, encode};
use super::options::EncoderOptions;

use crate::error::EncodingError;

use common::ErrorLocation;
use models::EncodableValue;

use std::panic::Location;

use serde_json::{Map, Number, Value};

impl Target for Value {
    fn null() -> Self {
        Value::Null
    }

    fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    fn int(value: i64) -> Self {
        Value::from(value)
    }

    fn uint(value: u64) -> Self {
        Value::from(value)
    }

    fn float(value: f64) -> Result<Self, EncodingError> {
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| EncodingError::NonFiniteFloat {
                value,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn string(value: String) -> Self {
        Value::String(value)
    }

    fn list(items: Vec<Self>) -> Self {
        Value::Array(items)
    }

    fn map(entries: Vec<(String, Self)>) -> Self {
        Value::Object(entries.into_iter().collect::<Map<String, Value>>())
    }

    fn from_override(value: Value) -> Result<Self, EncodingError> {
        Ok(value)
    }

    fn into_key(self) -> Result<Option<String>, EncodingError> {
        match self {
            Value::String(key) => Ok(Some(key)),
            Value::Null => Ok(Some("null".to_string())),
            Value::Bool(key) => Ok(Some(key.to_string())),
            Value::Number(key) => Ok(Some(key.to_string())),
            other => Err(EncodingError::UnsupportedKey {
                message: format!("mapping key encodes to a container: {other}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Convert `value` to its JSON-safe form.
///
/// # Errors
///
/// Returns [`EncodingError`] if a value has no JSON form (invalid UTF-8 bytes,
/// non-finite floats, container keys, objects with neither view).
pub fn encode_json(
    value: &EncodableValue,
    options: &EncoderOptions,
) -> Result<Value, EncodingError> {
    encode(value, options)
}

/// Serialize `value` to a JSON string with default options.
///
/// # Errors
///
/// Returns [`EncodingError`] if the value cannot be encoded.
pub fn to_json_string(value: &EncodableValue) -> Result<String, EncodingError> {
    let json = encode_json(value, &EncoderOptions::default())?;
    Ok(json.to_string())
}
