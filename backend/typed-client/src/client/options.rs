use super::error_models::ErrorModels;

use crate::encoders::EncoderOptions;
use crate::responses::{DecodeOptions, ResponseClass};

use models::EncodableValue;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Body;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Request payload sent as-is, without JSON encoding.
pub enum RequestData {
    Bytes(Bytes),
    Text(String),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    Multipart(Form),
    Stream(Body),
}

impl fmt::Debug for RequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestData::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            RequestData::Text(text) => write!(f, "Text({} chars)", text.chars().count()),
            RequestData::Form(fields) => f.debug_tuple("Form").field(fields).finish(),
            RequestData::Multipart(form) => write!(f, "Multipart(boundary={})", form.boundary()),
            RequestData::Stream(_) => f.write_str("Stream(<body>)"),
        }
    }
}

impl RequestData {
    pub(crate) fn apply(self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            RequestData::Bytes(bytes) => builder.body(bytes),
            RequestData::Text(text) => builder.body(text),
            RequestData::Form(fields) => builder.form(&fields),
            RequestData::Multipart(form) => builder.multipart(form),
            RequestData::Stream(body) => builder.body(body),
        }
    }
}

/// Everything that can vary per call.
///
/// `T` is the type successful responses are validated into when decoding
/// with [`ResponseClass::Model`]; pick it with [`RequestOptions::with_schema`].
pub struct RequestOptions<T = Value> {
    pub body: Option<EncodableValue>,
    pub data: Option<RequestData>,
    pub headers: Option<EncodableValue>,
    pub cookies: Option<EncodableValue>,
    pub params: Option<EncodableValue>,
    pub response_class: Option<ResponseClass>,
    pub timeout: Option<Duration>,
    /// Upload/download chunk size; the client default when unset.
    pub chunk_size: Option<usize>,
    pub error_models: ErrorModels,
    pub encoder: EncoderOptions,
    pub decode: DecodeOptions<T>,
}

impl<T> Default for RequestOptions<T> {
    fn default() -> Self {
        Self {
            body: None,
            data: None,
            headers: None,
            cookies: None,
            params: None,
            response_class: None,
            timeout: None,
            chunk_size: None,
            error_models: ErrorModels::default(),
            encoder: EncoderOptions::default(),
            decode: DecodeOptions::default(),
        }
    }
}

impl<T> fmt::Debug for RequestOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("body", &self.body)
            .field("data", &self.data)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("params", &self.params)
            .field("response_class", &self.response_class)
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .field("error_models", &self.error_models)
            .field("decode", &self.decode)
            .finish_non_exhaustive()
    }
}

impl RequestOptions<Value> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> RequestOptions<T> {
    /// Validate successful responses into `U`.
    pub fn with_schema<U: DeserializeOwned>(self) -> RequestOptions<U> {
        RequestOptions {
            body: self.body,
            data: self.data,
            headers: self.headers,
            cookies: self.cookies,
            params: self.params,
            response_class: self.response_class,
            timeout: self.timeout,
            chunk_size: self.chunk_size,
            error_models: self.error_models,
            encoder: self.encoder,
            decode: self.decode.with_schema(),
        }
    }

    /// JSON body; encoded with [`RequestOptions::encoder`].
    pub fn with_body(mut self, body: impl Into<EncodableValue>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_data(mut self, data: RequestData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_headers(mut self, headers: impl Into<EncodableValue>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn with_cookies(mut self, cookies: impl Into<EncodableValue>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn with_params(mut self, params: impl Into<EncodableValue>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn with_response_class(mut self, response_class: ResponseClass) -> Self {
        self.response_class = Some(response_class);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Decode error bodies for `status` into `E` for this call only.
    pub fn with_error_model<E>(mut self, status: u16) -> Self
    where
        E: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        self.error_models.insert::<E>(status);
        self
    }

    pub fn with_error_models(mut self, error_models: ErrorModels) -> Self {
        self.error_models = error_models;
        self
    }

    pub fn with_encoder_options(mut self, encoder: EncoderOptions) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.decode = self.decode.with_file_path(file_path);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.decode = self.decode.with_charset(charset);
        self
    }

    /// Decoder used on success: the explicit class, else `Model` when a schema
    /// was given, else `fallback`.
    pub fn effective_class(&self, fallback: ResponseClass) -> ResponseClass {
        match (self.response_class, self.decode.schema) {
            (Some(class), _) => class,
            (None, Some(_)) => ResponseClass::Model,
            (None, None) => fallback,
        }
    }
}
