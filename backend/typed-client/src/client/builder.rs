use super::error_models::ErrorModels;
use super::merge::{header_map, url_pairs};
use super::{Client, ClientDefaults};

use crate::error::ClientError;
use crate::responses::{DEFAULT_CHUNK_SIZE, ResponseClass};

use common::RedactedToken;
use models::EncodableValue;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;
use zeroize::Zeroizing;

/// Per-call timeout when neither the client nor the call sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_USER_AGENT: &str =
    const_format::concatcp!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Client`].
///
/// Headers, cookies and params accept any [`EncodableValue`] that encodes to a
/// flat mapping (a `HashMap`, a model, a record...).
pub struct ClientBuilder {
    base_url: Option<String>,
    headers: Option<EncodableValue>,
    cookies: Option<EncodableValue>,
    params: Option<EncodableValue>,
    bearer_token: Option<RedactedToken>,
    response_class: ResponseClass,
    error_models: ErrorModels,
    user_agent: String,
    timeout: Duration,
    chunk_size: usize,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: None,
            cookies: None,
            params: None,
            bearer_token: None,
            response_class: ResponseClass::default(),
            error_models: ErrorModels::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("params", &self.params)
            .field("bearer_token", &self.bearer_token)
            .field("response_class", &self.response_class)
            .field("error_models", &self.error_models)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base every request path is joined onto.
    ///
    /// Joining follows URL reference resolution: keep a trailing slash on the
    /// base (`http://host/api/`) and use relative paths (`users`) to stay under it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn headers(mut self, headers: impl Into<EncodableValue>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn cookies(mut self, cookies: impl Into<EncodableValue>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn params(mut self, params: impl Into<EncodableValue>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Send `Authorization: Bearer <token>` on every request.
    ///
    /// Accepts a plain string or a `secrecy::SecretString`.
    pub fn bearer_token(mut self, token: impl Into<RedactedToken>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Decoder used when a call picks none.
    pub fn response_class(mut self, response_class: ResponseClass) -> Self {
        self.response_class = response_class;
        self
    }

    pub fn error_models(mut self, error_models: ErrorModels) -> Self {
        self.error_models = error_models;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upload and download chunk size for calls that set none.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Encode the defaults once and build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the chunk size is zero, the base URL does not
    /// parse, a default does not encode to flat string pairs, the token is
    /// invalid or the transport cannot be built.
    pub fn build(self) -> Result<Client, ClientError> {
        if self.chunk_size == 0 {
            return Err(ClientError::configuration("chunk size must be positive"));
        }

        let base_url = self.base_url.as_deref().map(Url::parse).transpose()?;

        let mut headers = match &self.headers {
            Some(headers) => header_map(url_pairs(headers)?)?,
            None => HeaderMap::new(),
        };

        if let Some(token) = &self.bearer_token {
            token
                .validate()
                .map_err(|e| ClientError::configuration(e.to_string()))?;
            let authorization = Zeroizing::new(token.authorization_value());
            let mut value = HeaderValue::from_str(&authorization)
                .map_err(|e| ClientError::configuration(format!("invalid bearer token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let cookies = self.cookies.as_ref().map(url_pairs).transpose()?.unwrap_or_default();
        let params = self.params.as_ref().map(url_pairs).transpose()?.unwrap_or_default();

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()?;

        debug!(
            "Built client for {}",
            base_url.as_ref().map_or("<no base url>", Url::as_str)
        );

        Ok(Client {
            http,
            defaults: Arc::new(ClientDefaults {
                base_url,
                headers,
                cookies,
                params,
                response_class: self.response_class,
                error_models: self.error_models,
                timeout: self.timeout,
                chunk_size: self.chunk_size,
            }),
        })
    }
}
