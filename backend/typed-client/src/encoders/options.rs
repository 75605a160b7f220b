use models::{CustomEncoders, DumpOptions, FieldFilter};

use std::borrow::Cow;

/// String keys starting with this prefix are dropped from mappings unless
/// [`EncoderOptions::keep_reserved_keys`] is set.
pub const RESERVED_KEY_PREFIX: &str = "_sa";

/// Options threaded through one encoding pass.
///
/// Include/exclude apply to the top-level value (and to the items of top-level
/// sequences and records); they are cleared for mapping children and for the
/// dumped contents of a model.
#[derive(Debug, Clone)]
pub struct EncoderOptions {
    pub filter: FieldFilter,
    pub by_alias: bool,
    pub exclude_unset: bool,
    pub exclude_defaults: bool,
    pub exclude_none: bool,
    pub custom_encoders: CustomEncoders,
    pub keep_reserved_keys: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            filter: FieldFilter::default(),
            by_alias: true,
            exclude_unset: false,
            exclude_defaults: false,
            exclude_none: false,
            custom_encoders: CustomEncoders::default(),
            keep_reserved_keys: false,
        }
    }
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults used for headers, cookies and query parameters: unset model
    /// fields are left out.
    pub fn for_url() -> Self {
        Self {
            exclude_unset: true,
            ..Self::default()
        }
    }

    pub fn with_include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.include(keys);
        self
    }

    pub fn with_exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.exclude(keys);
        self
    }

    pub fn with_by_alias(mut self, by_alias: bool) -> Self {
        self.by_alias = by_alias;
        self
    }

    pub fn with_exclude_unset(mut self, exclude_unset: bool) -> Self {
        self.exclude_unset = exclude_unset;
        self
    }

    pub fn with_exclude_defaults(mut self, exclude_defaults: bool) -> Self {
        self.exclude_defaults = exclude_defaults;
        self
    }

    pub fn with_exclude_none(mut self, exclude_none: bool) -> Self {
        self.exclude_none = exclude_none;
        self
    }

    pub fn with_custom_encoders(mut self, custom_encoders: CustomEncoders) -> Self {
        self.custom_encoders = custom_encoders;
        self
    }

    pub fn with_reserved_keys(mut self, keep: bool) -> Self {
        self.keep_reserved_keys = keep;
        self
    }

    pub(crate) fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            filter: self.filter.clone(),
            by_alias: self.by_alias,
            exclude_unset: self.exclude_unset,
            exclude_defaults: self.exclude_defaults,
            exclude_none: self.exclude_none,
        }
    }

    /// Same options with include/exclude cleared.
    pub(crate) fn without_filter(&self) -> Cow<'_, EncoderOptions> {
        if self.filter.is_empty() {
            return Cow::Borrowed(self);
        }
        Cow::Owned(Self {
            filter: FieldFilter::default(),
            ..self.clone()
        })
    }

    /// Options for the contents of a model: no filter, model encoders merged in.
    pub(crate) fn for_model_contents(&self, model_encoders: CustomEncoders) -> Self {
        Self {
            filter: FieldFilter::default(),
            custom_encoders: model_encoders.merged_with(&self.custom_encoders),
            ..self.clone()
        }
    }

    pub(crate) fn is_reserved(&self, key: &str) -> bool {
        !self.keep_reserved_keys && key.starts_with(RESERVED_KEY_PREFIX)
    }
}
