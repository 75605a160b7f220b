//! Per-type encoder overrides.

use crate::{EncodableValue, TypeKey};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Override turning a value straight into its JSON-safe form.
pub type EncoderFn = Arc<dyn Fn(&EncodableValue) -> Value + Send + Sync>;

/// Ordered table of encoder overrides keyed by [`TypeKey`].
///
/// Resolution tries the exact key of a value first, then its ancestors.
#[derive(Clone, Default)]
pub struct CustomEncoders {
    entries: IndexMap<TypeKey, EncoderFn>,
}

impl CustomEncoders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the override for `key`.
    pub fn with<F>(mut self, key: TypeKey, encoder: F) -> Self
    where
        F: Fn(&EncodableValue) -> Value + Send + Sync + 'static,
    {
        self.insert(key, encoder);
        self
    }

    pub fn insert<F>(&mut self, key: TypeKey, encoder: F)
    where
        F: Fn(&EncodableValue) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(key, Arc::new(encoder));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Override for `value`: exact type first, then by inheritance.
    pub fn resolve(&self, value: &EncodableValue) -> Option<&EncoderFn> {
        if self.entries.is_empty() {
            return None;
        }
        value
            .type_key()
            .lineage()
            .find_map(|key| self.entries.get(&key))
    }

    /// Union of `self` and `overrides`; entries in `overrides` win on the same key.
    pub fn merged_with(&self, overrides: &CustomEncoders) -> CustomEncoders {
        let mut merged = self.clone();
        for (key, encoder) in &overrides.entries {
            merged.entries.insert(key.clone(), Arc::clone(encoder));
        }
        merged
    }
}

impl fmt::Debug for CustomEncoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
