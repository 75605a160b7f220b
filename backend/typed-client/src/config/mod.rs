//! File-based client configuration.
//!
//! `client.toml` lives in `{config_dir}/typed-http/` unless a directory is
//! given explicitly. A missing file means defaults; a present but broken file
//! is an error.

use crate::client::ClientBuilder;
use crate::error::config::ConfigError;
use crate::responses::{DEFAULT_CHUNK_SIZE, ResponseClass};

use common::{ErrorLocation, RedactedToken};

use std::collections::HashMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "client.toml";
pub const CONFIG_DIR_NAME: &str = "typed-http";

const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub response_class: ResponseClass,

    /// Name of the environment variable holding the bearer token.
    #[serde(default)]
    pub bearer_token_env: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub cookies: HashMap<String, String>,

    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            chunk_size: default_chunk_size(),
            response_class: ResponseClass::default(),
            bearer_token_env: None,
            user_agent: None,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            params: HashMap::new(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_timeout_secs() -> u64 {
    crate::client::DEFAULT_TIMEOUT.as_secs()
}
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// `{config_dir}/typed-http`, if the platform has a config directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Load config from {config_dir}/client.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::ParseError {
                location, reason, ..
            } => ConfigError::ParseError {
                location,
                path: config_path.clone(),
                reason,
            },
            other => other,
        })?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load from [`ClientConfig::default_dir`], or defaults if there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_dir() {
            Some(dir) => Self::load(&dir),
            None => {
                warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: PathBuf::from(CONFIG_FILE_NAME),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Invalid base_url format: {}", url),
                });
            }
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout_secs: {} (must be 1-{})",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "chunk_size must be positive".to_string(),
            });
        }

        // Model and stream decoding need a schema or a file path per call.
        if matches!(
            self.response_class,
            ResponseClass::Model | ResponseClass::Stream
        ) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "response_class '{}' cannot be a client default",
                    self.response_class
                ),
            });
        }

        if let Some(ref variable) = self.bearer_token_env {
            if variable.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: "bearer_token_env cannot be empty string".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Bearer token from the environment (after loading `.env`), if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvError`] if the variable is configured but unset.
    pub fn bearer_token(&self) -> Result<Option<RedactedToken>, ConfigError> {
        let Some(variable) = &self.bearer_token_env else {
            return Ok(None);
        };

        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Failed to load .env: {}", e);
            }
        }

        std::env::var(variable)
            .map(|token| Some(RedactedToken::new(token)))
            .map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: variable.clone(),
                reason: e.to_string(),
            })
    }

    /// Client builder carrying every configured default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvError`] if the bearer token variable is unset.
    pub fn into_builder(self) -> Result<ClientBuilder, ConfigError> {
        let token = self.bearer_token()?;

        let mut builder = ClientBuilder::new()
            .timeout(self.timeout())
            .chunk_size(self.chunk_size)
            .response_class(self.response_class);

        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(token) = token {
            builder = builder.bearer_token(token);
        }
        if !self.headers.is_empty() {
            builder = builder.headers(self.headers);
        }
        if !self.cookies.is_empty() {
            builder = builder.cookies(self.cookies);
        }
        if !self.params.is_empty() {
            builder = builder.params(self.params);
        }

        Ok(builder)
    }
}
