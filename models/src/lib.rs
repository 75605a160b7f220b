//! The encodable value model.
//!
//! This crate contains the data structures the encoders walk: a closed
//! [`EncodableValue`] tree covering primitives, collections, domain scalars
//! and user-defined models/records, plus the [`TypeKey`] identity used to
//! pick custom encoders. It has no transport logic.
//!
//! ## Architecture
//!
//! - **models** (this crate): What can be encoded
//! - **typed-client**: How it is encoded, sent and decoded

pub mod encoders;
pub mod error;
pub mod model;
pub mod object;
pub mod record;
pub mod scalars;
pub mod type_key;
pub mod value;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use encoders::{CustomEncoders, EncoderFn};
pub use error::model_error::ModelError;
pub use model::{DumpOptions, DynamicModel, FieldFilter, Model, ModelField, ROOT_FIELD, dump_model};
pub use object::ObjectLike;
pub use record::{Record, RecordBuilder};
pub use scalars::{Color, IpNetwork};
pub use type_key::TypeKey;
pub use value::{EncodableValue, EnumMember, SequenceKind};
