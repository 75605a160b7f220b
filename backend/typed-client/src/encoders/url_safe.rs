use super::dispatch::{Target, encode};
use super::options::EncoderOptions;

use crate::error::EncodingError;

use common::ErrorLocation;
use models::EncodableValue;

use std::fmt;
use std::panic::Location;

use indexmap::IndexMap;
use serde_json::Value;

/// URL-safe form of a value: strings, lists and string-keyed maps only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValue {
    Str(String),
    List(Vec<UrlValue>),
    Map(IndexMap<String, UrlValue>),
}

impl UrlValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UrlValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Flatten a top-level map into `(key, value)` pairs; list values repeat
    /// their key once per item.
    ///
    /// An empty string (what `null` encodes to) yields no pairs.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::NotFlat`] if the value is not a map or a value
    /// nests deeper than a list of strings.
    #[track_caller]
    pub fn into_pairs(self) -> Result<Vec<(String, String)>, EncodingError> {
        let entries = match self {
            UrlValue::Map(entries) => entries,
            UrlValue::Str(value) if value.is_empty() => return Ok(Vec::new()),
            other => {
                return Err(EncodingError::NotFlat {
                    message: format!("expected a mapping, got {other}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let mut pairs = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                UrlValue::Str(value) => pairs.push((key, value)),
                UrlValue::List(items) => {
                    for item in items {
                        let UrlValue::Str(item) = item else {
                            return Err(EncodingError::NotFlat {
                                message: format!("nested list item under '{key}': {item}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        };
                        pairs.push((key.clone(), item));
                    }
                }
                UrlValue::Map(_) => {
                    return Err(EncodingError::NotFlat {
                        message: format!("nested mapping under '{key}'"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
        Ok(pairs)
    }
}

impl fmt::Display for UrlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlValue::Str(value) => write!(f, "{value:?}"),
            UrlValue::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            UrlValue::Map(entries) => {
                write!(f, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Float text where integral values keep one fractional digit (`1.0`).
fn render_float(value: f64) -> String {
    format!("{value:?}")
}

impl Target for UrlValue {
    fn null() -> Self {
        UrlValue::Str(String::new())
    }

    fn bool(value: bool) -> Self {
        UrlValue::Str(value.to_string())
    }

    fn int(value: i64) -> Self {
        UrlValue::Str(value.to_string())
    }

    fn uint(value: u64) -> Self {
        UrlValue::Str(value.to_string())
    }

    fn float(value: f64) -> Result<Self, EncodingError> {
        Ok(UrlValue::Str(render_float(value)))
    }

    fn string(value: String) -> Self {
        UrlValue::Str(value)
    }

    fn list(items: Vec<Self>) -> Self {
        UrlValue::List(items)
    }

    fn map(entries: Vec<(String, Self)>) -> Self {
        UrlValue::Map(entries.into_iter().collect())
    }

    fn from_override(value: Value) -> Result<Self, EncodingError> {
        Ok(match value {
            Value::Null => UrlValue::null(),
            Value::Bool(value) => UrlValue::bool(value),
            Value::Number(number) => match number.as_f64() {
                Some(float) if !number.is_i64() && !number.is_u64() => {
                    UrlValue::Str(render_float(float))
                }
                _ => UrlValue::Str(number.to_string()),
            },
            Value::String(value) => UrlValue::Str(value),
            Value::Array(items) => UrlValue::List(
                items
                    .into_iter()
                    .map(UrlValue::from_override)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(entries) => UrlValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, UrlValue::from_override(value)?)))
                    .collect::<Result<_, EncodingError>>()?,
            ),
        })
    }

    fn into_key(self) -> Result<Option<String>, EncodingError> {
        match self {
            UrlValue::Str(key) if key.is_empty() => Ok(None),
            UrlValue::Str(key) => Ok(Some(key)),
            other => Err(EncodingError::UnsupportedKey {
                message: format!("mapping key encodes to a container: {other}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Convert `value` to its URL-safe form (headers, cookies, query parameters).
///
/// # Errors
///
/// Returns [`EncodingError`] if a value has no URL form.
pub fn encode_url(
    value: &EncodableValue,
    options: &EncoderOptions,
) -> Result<UrlValue, EncodingError> {
    encode(value, options)
}
