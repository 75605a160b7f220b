use crate::{EncodableValue, Model};

use std::collections::HashSet;
use std::sync::Arc;

/// Include/exclude sets applied to keys. Exclude always wins.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    include: Option<Arc<HashSet<String>>>,
    exclude: Option<Arc<HashSet<String>>>,
}

impl FieldFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(Arc::new(keys.into_iter().map(Into::into).collect()));
        self
    }

    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(Arc::new(keys.into_iter().map(Into::into).collect()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    pub fn has_include(&self) -> bool {
        self.include.is_some()
    }

    /// `key ∈ include (when given) ∧ key ∉ exclude (when given)`.
    pub fn allows(&self, key: &str) -> bool {
        let included = self.include.as_ref().is_none_or(|keys| keys.contains(key));
        let excluded = self.exclude.as_ref().is_some_and(|keys| keys.contains(key));
        included && !excluded
    }
}

/// Options for dumping a model to a field mapping.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub filter: FieldFilter,
    pub by_alias: bool,
    pub exclude_unset: bool,
    pub exclude_defaults: bool,
    pub exclude_none: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            filter: FieldFilter::default(),
            by_alias: true,
            exclude_unset: false,
            exclude_defaults: false,
            exclude_none: false,
        }
    }
}

/// Dump `model` to `(key, value)` pairs in field order.
///
/// Include/exclude match field names (not aliases); the emitted key is the
/// alias when `by_alias` is set and the field has one.
pub fn dump_model(model: &dyn Model, options: &DumpOptions) -> Vec<(String, EncodableValue)> {
    model
        .fields()
        .into_iter()
        .filter(|field| options.filter.allows(&field.name))
        .filter(|field| !(options.exclude_unset && !field.is_set))
        .filter(|field| !(options.exclude_defaults && field.is_default))
        .filter(|field| !(options.exclude_none && field.value.is_null()))
        .map(|field| (field.key(options.by_alias).to_string(), field.value))
        .collect()
}
