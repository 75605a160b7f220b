//! The recursive dispatcher shared by the JSON and URL encoders.
//!
//! Dispatch order at every level: caller/model overrides, models, records,
//! enums, paths, primitives, mappings, sequences, the built-in table and
//! finally the object fallback.

use super::builtin::encode_builtin;
use super::options::EncoderOptions;

use crate::error::EncodingError;

use common::ErrorLocation;
use models::{
    EncodableValue, FieldFilter, Model, ObjectLike, ROOT_FIELD, SequenceKind, dump_model,
};

use std::panic::Location;

use serde_json::Value;

/// Output format of an encoding pass.
pub(crate) trait Target: Sized {
    fn null() -> Self;
    fn bool(value: bool) -> Self;
    fn int(value: i64) -> Self;
    fn uint(value: u64) -> Self;
    fn float(value: f64) -> Result<Self, EncodingError>;
    fn string(value: String) -> Self;
    fn list(items: Vec<Self>) -> Self;
    fn map(entries: Vec<(String, Self)>) -> Self;

    /// Adopt the JSON produced by a custom encoder without re-dispatching it.
    fn from_override(value: Value) -> Result<Self, EncodingError>;

    /// Render an encoded mapping key; `None` drops the entry.
    fn into_key(self) -> Result<Option<String>, EncodingError>;
}

pub(crate) fn encode<T: Target>(
    value: &EncodableValue,
    options: &EncoderOptions,
) -> Result<T, EncodingError> {
    if let Some(encoder) = options.custom_encoders.resolve(value) {
        return T::from_override(encoder(value));
    }

    match value {
        EncodableValue::Model(model) => encode_model(model.as_ref(), options),
        EncodableValue::Record(record) => encode(&record.to_mapping(), options),
        EncodableValue::Enum(member) => encode(&member.value, options),
        EncodableValue::Path(path) => Ok(T::string(path.to_string_lossy().into_owned())),
        EncodableValue::Null => Ok(T::null()),
        EncodableValue::Bool(value) => Ok(T::bool(*value)),
        EncodableValue::Int(value) => Ok(T::int(*value)),
        EncodableValue::UInt(value) => Ok(T::uint(*value)),
        EncodableValue::Float(value) => T::float(*value),
        EncodableValue::Str(value) => Ok(T::string(value.clone())),
        EncodableValue::Mapping(entries) => encode_mapping(entries, options),
        EncodableValue::Sequence(
            SequenceKind::List | SequenceKind::Tuple | SequenceKind::Set | SequenceKind::Generator,
            items,
        ) => items
            .iter()
            .map(|item| encode(item, options))
            .collect::<Result<Vec<_>, _>>()
            .map(T::list),
        EncodableValue::Object(object) => encode_object(object.as_ref(), options),
        other => match encode_builtin(other) {
            Some(plain) => encode(&plain?, options),
            None => Err(EncodingError::Unconvertible {
                type_name: other.type_name(),
                errors: vec!["no built-in encoder".to_string()],
                location: ErrorLocation::from(Location::caller()),
            }),
        },
    }
}

fn encode_model<T: Target>(
    model: &dyn Model,
    options: &EncoderOptions,
) -> Result<T, EncodingError> {
    let mut fields = dump_model(model, &options.dump_options());
    let contents_options = options.for_model_contents(model.json_encoders());

    let contents = match fields.iter().position(|(key, _)| key == ROOT_FIELD) {
        Some(index) => fields.swap_remove(index).1,
        None => EncodableValue::mapping(fields),
    };
    encode(&contents, &contents_options)
}

fn encode_mapping<T: Target>(
    entries: &[(EncodableValue, EncodableValue)],
    options: &EncoderOptions,
) -> Result<T, EncodingError> {
    let children = options.without_filter();
    let mut encoded = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if matches!(key, EncodableValue::Str(name) if options.is_reserved(name)) {
            continue;
        }
        if options.exclude_none && value.is_null() {
            continue;
        }
        if !key_allowed(key, &options.filter) {
            continue;
        }

        let Some(encoded_key) = encode::<T>(key, &children)?.into_key()? else {
            continue;
        };
        encoded.push((encoded_key, encode(value, &children)?));
    }

    Ok(T::map(encoded))
}

fn encode_object<T: Target>(
    object: &dyn ObjectLike,
    options: &EncoderOptions,
) -> Result<T, EncodingError> {
    let pairs_error = match object.to_pairs() {
        Ok(pairs) => return encode(&EncodableValue::Mapping(pairs), options),
        Err(error) => error,
    };

    match object.to_attributes() {
        Ok(attributes) => encode(&EncodableValue::mapping(attributes), options),
        Err(attributes_error) => Err(EncodingError::Unconvertible {
            type_name: object.type_name().to_string(),
            errors: vec![pairs_error, attributes_error],
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Include/exclude match keys by the string form they are written under.
fn key_allowed(key: &EncodableValue, filter: &FieldFilter) -> bool {
    if filter.is_empty() {
        return true;
    }
    match key_name(key) {
        Some(name) => filter.allows(&name),
        None => !filter.has_include(),
    }
}

fn key_name(key: &EncodableValue) -> Option<String> {
    match key {
        EncodableValue::Str(name) => Some(name.clone()),
        EncodableValue::Int(value) => Some(value.to_string()),
        EncodableValue::UInt(value) => Some(value.to_string()),
        EncodableValue::Bool(value) => Some(value.to_string()),
        EncodableValue::Enum(member) => key_name(&member.value),
        _ => None,
    }
}
