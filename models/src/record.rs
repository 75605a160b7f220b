//! Plain compound values with named fields (no validation, no aliases).

use crate::{EncodableValue, ErrorLocation, ModelError};

use std::collections::HashSet;
use std::panic::Location;

/// A named bag of fields, the encoder's equivalent of a plain data struct.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, EncodableValue)>,
}

impl Record {
    pub fn builder(type_name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, EncodableValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&EncodableValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field mapping in declaration order.
    pub fn to_mapping(&self) -> EncodableValue {
        EncodableValue::Mapping(
            self.fields
                .iter()
                .map(|(name, value)| (EncodableValue::Str(name.clone()), value.clone()))
                .collect(),
        )
    }
}

/// Builder for creating validated Record instances.
///
/// Provides a fluent API; [`RecordBuilder::build`] rejects empty type names
/// and duplicate field names.
#[derive(Debug)]
pub struct RecordBuilder {
    type_name: String,
    fields: Vec<(String, EncodableValue)>,
}

impl RecordBuilder {
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<EncodableValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Build the record.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the type name is empty or a field
    /// name repeats.
    #[track_caller]
    pub fn build(self) -> Result<Record, ModelError> {
        if self.type_name.trim().is_empty() {
            return Err(ModelError::Validation {
                message: "record type name is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for (name, _) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::Validation {
                    message: format!("duplicate field '{name}' in record {}", self.type_name),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(Record {
            type_name: self.type_name,
            fields: self.fields,
        })
    }
}
