//! The request client.
//!
//! A [`Client`] owns immutable defaults (headers, cookies, params, decoder,
//! error models) behind an `Arc`; every call merges its own overrides into
//! fresh collections, so clones can be used from concurrent tasks.

mod builder;
mod error_models;
pub(crate) mod files;
pub(crate) mod merge;
mod options;

pub use builder::{ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error_models::ErrorModels;
pub use files::{DEFAULT_FORM_KEY, read_file_by_chunk};
pub use options::{RequestData, RequestOptions};

use merge::{apply_cookies, header_map, merge_headers, merge_pairs, url_pairs};

use crate::encoders::encode_json;
use crate::error::{ClientError, HttpError};
use crate::responses::{Decoded, ResponseClass, decode_json_text};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

struct ClientDefaults {
    base_url: Option<Url>,
    headers: HeaderMap,
    cookies: Vec<(String, String)>,
    params: Vec<(String, String)>,
    response_class: ResponseClass,
    error_models: ErrorModels,
    timeout: Duration,
    chunk_size: usize,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    defaults: Arc<ClientDefaults>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.defaults.base_url.as_ref().map(Url::as_str))
            .field("default_headers", &self.defaults.headers.len())
            .field("response_class", &self.defaults.response_class)
            .field("error_models", &self.defaults.error_models)
            .field("timeout", &self.defaults.timeout)
            .field("chunk_size", &self.defaults.chunk_size)
            .finish()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.defaults.base_url.as_ref()
    }

    /// Chunk size used for uploads and downloads when a call sets none.
    pub fn chunk_size(&self) -> usize {
        self.defaults.chunk_size
    }

    /// Send one request and decode the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] for any non-2xx status, and the other
    /// [`ClientError`] variants for encoding, transport and decoding failures.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        let response = self.prepare(method, path, &mut options)?.send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, &options.error_models).await);
        }

        let class = options.effective_class(self.defaults.response_class);
        class.parse(response, &options.decode).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        self.request(Method::PATCH, path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<T>,
    ) -> Result<Decoded<T>, ClientError> {
        self.request(Method::DELETE, path, options).await
    }

    /// Release the transport. Connections close once every clone is gone.
    pub fn close(self) {
        debug!(
            "Closing client for {}",
            self.base_url().map_or("<no base url>", Url::as_str)
        );
    }

    pub(crate) fn resolve_url(&self, path: &str) -> Result<Url, ClientError> {
        match &self.defaults.base_url {
            Some(base) => Ok(base.join(path)?),
            None => Ok(Url::parse(path)?),
        }
    }

    /// Build the transport request. Takes the body and data out of `options`.
    pub(crate) fn prepare<T>(
        &self,
        method: Method,
        path: &str,
        options: &mut RequestOptions<T>,
    ) -> Result<RequestBuilder, ClientError> {
        if options.body.is_some() && options.data.is_some() {
            return Err(ClientError::configuration(
                "body and data are mutually exclusive",
            ));
        }

        let url = self.resolve_url(path)?;

        let call_headers = match &options.headers {
            Some(headers) => header_map(url_pairs(headers)?)?,
            None => HeaderMap::new(),
        };
        let mut headers = merge_headers(&self.defaults.headers, call_headers);

        let call_cookies = options.cookies.as_ref().map(url_pairs).transpose()?;
        let cookies = merge_pairs(&self.defaults.cookies, call_cookies.unwrap_or_default());
        apply_cookies(&mut headers, &cookies)?;

        let call_params = options.params.as_ref().map(url_pairs).transpose()?;
        let params = merge_pairs(&self.defaults.params, call_params.unwrap_or_default());

        let timeout = options.timeout.unwrap_or(self.defaults.timeout);
        options.decode.chunk_size = self.chunk_size_for(options);
        debug!("{} {} ({} params, timeout {:?})", method, url, params.len(), timeout);

        let mut builder = self
            .http
            .request(method, url)
            .headers(headers)
            .timeout(timeout);
        if !params.is_empty() {
            builder = builder.query(&params);
        }

        if let Some(body) = options.body.take() {
            builder = builder.json(&encode_json(&body, &options.encoder)?);
        } else if let Some(data) = options.data.take() {
            builder = data.apply(builder);
        }

        Ok(builder)
    }

    pub(crate) fn chunk_size_for<T>(&self, options: &RequestOptions<T>) -> usize {
        options.chunk_size.unwrap_or(self.defaults.chunk_size)
    }

    /// Typed error for a non-2xx response.
    pub(crate) async fn error_for(&self, response: Response, call_models: &ErrorModels) -> ClientError {
        let status = response.status().as_u16();
        warn!("{} returned HTTP {}", response.url(), status);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ClientError::from(e),
        };
        let json = match decode_json_text(text) {
            Ok(json) => json,
            Err(e) => return ClientError::from(e),
        };

        match self.defaults.error_models.merged_with(call_models).payload(status, json) {
            Ok(payload) => ClientError::Http(HttpError::new(status, payload)),
            Err(e) => e,
        }
    }
}
