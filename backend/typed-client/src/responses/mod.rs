//! Response decoders.
//!
//! A [`ResponseClass`] is picked per call (or from the client default) and
//! turns a successful response into a [`Decoded`] value.

mod parse;
mod stream;

pub use parse::{is_json_content_type, parse_json, parse_model, parse_raw, parse_text};
pub use stream::{parse_stream, write_stream};

pub(crate) use parse::decode_json_text;

use crate::error::ClientError;

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::pin::Pin;
use std::str::FromStr;

use bytes::Bytes;
use futures_util::Stream;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 64 KiB, used for downloads, uploads and streamed request bodies.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Unconsumed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

// ============================================
// DECODER VARIANTS
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseClass {
    /// Hand back the body as a byte stream.
    Raw,
    /// Discard the body.
    None,
    PlainText,
    #[default]
    Json,
    /// JSON validated into the call's schema type.
    Model,
    /// Write the body to a file.
    Stream,
}

impl ResponseClass {
    pub const ALL: [ResponseClass; 6] = [
        ResponseClass::Raw,
        ResponseClass::None,
        ResponseClass::PlainText,
        ResponseClass::Json,
        ResponseClass::Model,
        ResponseClass::Stream,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResponseClass::Raw => "raw",
            ResponseClass::None => "none",
            ResponseClass::PlainText => "plain_text",
            ResponseClass::Json => "json",
            ResponseClass::Model => "model",
            ResponseClass::Stream => "stream",
        }
    }

    /// Decode a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the body cannot be read or decoded, or if the
    /// variant needs an option (schema, file path) that is missing.
    pub async fn parse<T: DeserializeOwned>(
        self,
        response: Response,
        options: &DecodeOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        match self {
            ResponseClass::Raw => Ok(Decoded::Raw(parse_raw(response))),
            ResponseClass::None => {
                drop(response);
                Ok(Decoded::None)
            }
            ResponseClass::PlainText => parse_text(response, &options.charset)
                .await
                .map(Decoded::Text),
            ResponseClass::Json => parse_json(response).await.map(Decoded::Json),
            ResponseClass::Model => parse_model(response, options.schema)
                .await
                .map(Decoded::Model),
            ResponseClass::Stream => {
                parse_stream(response, options.file_path.as_deref(), options.chunk_size)
                    .await
                    .map(Decoded::File)
            }
        }
    }
}

impl fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseClass::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| format!("unknown response class '{s}'"))
    }
}

// ============================================
// DECODED VALUES
// ============================================

pub enum Decoded<T = Value> {
    Raw(ByteStream),
    None,
    Text(String),
    Json(Value),
    Model(T),
    /// Path the body was written to.
    File(PathBuf),
}

impl<T> Decoded<T> {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Decoded::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_model(self) -> Option<T> {
        match self {
            Decoded::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Decoded::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Decoded::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_stream(self) -> Option<ByteStream> {
        match self {
            Decoded::Raw(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Decoded::None)
    }
}

impl<T: fmt::Debug> fmt::Debug for Decoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Raw(_) => f.write_str("Raw(<stream>)"),
            Decoded::None => f.write_str("None"),
            Decoded::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Decoded::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Decoded::Model(model) => f.debug_tuple("Model").field(model).finish(),
            Decoded::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

// ============================================
// DECODE OPTIONS
// ============================================

/// Marker naming the type a response is validated into.
pub struct Schema<T>(PhantomData<fn() -> T>);

impl<T> Schema<T> {
    pub const fn new() -> Self {
        Schema(PhantomData)
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Schema<T> {}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema<{}>", type_name::<T>())
    }
}

pub struct DecodeOptions<T = Value> {
    pub schema: Option<Schema<T>>,
    pub file_path: Option<PathBuf>,
    pub chunk_size: usize,
    pub charset: String,
}

impl<T> Default for DecodeOptions<T> {
    fn default() -> Self {
        Self {
            schema: None,
            file_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl<T> Clone for DecodeOptions<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            file_path: self.file_path.clone(),
            chunk_size: self.chunk_size,
            charset: self.charset.clone(),
        }
    }
}

impl<T> fmt::Debug for DecodeOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("schema", &self.schema)
            .field("file_path", &self.file_path)
            .field("chunk_size", &self.chunk_size)
            .field("charset", &self.charset)
            .finish()
    }
}

impl DecodeOptions<Value> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> DecodeOptions<T> {
    /// Validate responses into `U`.
    pub fn with_schema<U>(self) -> DecodeOptions<U> {
        DecodeOptions {
            schema: Some(Schema::new()),
            file_path: self.file_path,
            chunk_size: self.chunk_size,
            charset: self.charset,
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}
