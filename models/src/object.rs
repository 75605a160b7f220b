//! Values the encoder knows nothing about.
//!
//! The encoder's last resort for an [`ObjectLike`] is to view it first as an
//! iterable of key/value pairs, then as a bag of attributes. Implementors
//! override whichever view makes sense for them.

use crate::EncodableValue;

use std::fmt;

pub trait ObjectLike: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    /// Mapping-like view: an iterable of `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a description of why the object is not mapping-like.
    fn to_pairs(&self) -> Result<Vec<(EncodableValue, EncodableValue)>, String> {
        Err(format!("'{}' object is not iterable", self.type_name()))
    }

    /// Attribute-bag view: named attributes and their values.
    ///
    /// # Errors
    ///
    /// Returns a description of why the object has no attributes.
    fn to_attributes(&self) -> Result<Vec<(String, EncodableValue)>, String> {
        Err(format!(
            "'{}' object has no attribute dictionary",
            self.type_name()
        ))
    }
}
