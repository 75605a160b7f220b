use crate::{CustomEncoders, EncodableValue, ErrorLocation, Model, ModelError, ModelField};

use std::panic::Location;

use serde::Serialize;
use serde_json::Value;

/// A model assembled at runtime from fields, or from any `Serialize` value.
#[derive(Debug, Clone)]
pub struct DynamicModel {
    type_name: String,
    fields: Vec<ModelField>,
    encoders: CustomEncoders,
}

impl DynamicModel {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            encoders: CustomEncoders::new(),
        }
    }

    /// Every top-level field of the serde representation becomes a set field.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Serialization`] if serde fails, or
    /// [`ModelError::Validation`] if the value does not serialize to an object.
    #[track_caller]
    pub fn from_serialize<T: Serialize + ?Sized>(
        type_name: impl Into<String>,
        value: &T,
    ) -> Result<Self, ModelError> {
        let type_name = type_name.into();
        let json = serde_json::to_value(value).map_err(|e| ModelError::Serialization {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let Value::Object(map) = json else {
            return Err(ModelError::Validation {
                message: format!("{type_name} does not serialize to an object"),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let fields = map
            .into_iter()
            .map(|(name, value)| ModelField::new(name, EncodableValue::from(value)))
            .collect();

        Ok(Self {
            type_name,
            fields,
            encoders: CustomEncoders::new(),
        })
    }

    /// A model standing for a bare value (dumped under [`crate::ROOT_FIELD`]).
    pub fn root(type_name: impl Into<String>, value: impl Into<EncodableValue>) -> Self {
        Self::new(type_name).with_field(ModelField::new(crate::ROOT_FIELD, value))
    }

    pub fn with_field(mut self, field: ModelField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_encoders(mut self, encoders: CustomEncoders) -> Self {
        self.encoders = encoders;
        self
    }
}

impl Model for DynamicModel {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> Vec<ModelField> {
        self.fields.clone()
    }

    fn json_encoders(&self) -> CustomEncoders {
        self.encoders.clone()
    }
}
