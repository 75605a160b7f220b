//! Typed HTTP client.
//!
//! Requests carry values the [`encoders`] turn into JSON bodies or URL-safe
//! headers, cookies and query parameters; successful responses go through a
//! [`ResponseClass`] decoder and every non-2xx status becomes a typed
//! [`HttpError`].

pub mod client;
pub mod config;
pub mod encoders;
pub mod error;
pub mod responses;

#[cfg(test)]
mod tests;

pub use client::{
    Client, ClientBuilder, DEFAULT_FORM_KEY, ErrorModels, RequestData, RequestOptions,
    read_file_by_chunk,
};
pub use config::ClientConfig;
pub use encoders::{EncoderOptions, UrlValue, encode_json, encode_url, to_json_string};
pub use error::{
    ClientError, ConfigError, EncodingError, ErrorModel, ErrorPayload, HttpError, ParseError,
};
pub use responses::{DecodeOptions, Decoded, ResponseClass, Schema, write_stream};

pub use common::{HttpStatusCode, RedactedToken, StatusFamily, StatusKind};
pub use models::{CustomEncoders, EncodableValue, Model, ModelField, TypeKey};
pub use reqwest::Method;
