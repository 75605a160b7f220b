//! Validated models: structured values with field metadata.
//!
//! Validation itself is serde's job (`Deserialize`); this module covers the
//! other direction, dumping an instance to a field mapping.

mod dump;
mod dynamic;

pub use dump::{DumpOptions, FieldFilter, dump_model};
pub use dynamic::DynamicModel;

use crate::{CustomEncoders, EncodableValue};

use std::fmt;

/// Field name of a model that stands for a bare value rather than a record.
pub const ROOT_FIELD: &str = "__root__";

/// One field of a model instance, as reported by [`Model::fields`].
#[derive(Debug, Clone)]
pub struct ModelField {
    pub name: String,
    pub alias: Option<String>,
    pub value: EncodableValue,
    /// Whether the field was explicitly provided rather than defaulted.
    pub is_set: bool,
    /// Whether the value equals the field's declared default.
    pub is_default: bool,
}

impl ModelField {
    pub fn new(name: impl Into<String>, value: impl Into<EncodableValue>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value: value.into(),
            is_set: true,
            is_default: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the field as filled in from its default, not by the caller.
    pub fn unset(mut self) -> Self {
        self.is_set = false;
        self.is_default = true;
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Key the field is dumped under.
    pub fn key(&self, by_alias: bool) -> &str {
        match (&self.alias, by_alias) {
            (Some(alias), true) => alias,
            _ => &self.name,
        }
    }
}

/// A model instance the encoder can dump.
pub trait Model: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    /// Fields in declaration order.
    fn fields(&self) -> Vec<ModelField>;

    /// Per-type encoders declared by the model itself.
    fn json_encoders(&self) -> CustomEncoders {
        CustomEncoders::new()
    }
}
