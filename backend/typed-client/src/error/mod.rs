pub mod config;
pub mod encoding;
pub mod http;
pub mod parse;

pub use config::ConfigError;
pub use encoding::EncodingError;
pub use http::{ErrorModel, ErrorPayload, HttpError};
pub use parse::ParseError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use thiserror::Error as ThisError;

/// Everything a client call can fail with.
#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Configuration Error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    /// A body did not match the schema it was decoded into.
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connect: bool,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("IO Error: {}{source} {location}", .path.as_ref().map(|p| format!("{}: ", p.display())).unwrap_or_default())]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        ClientError::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ClientError::Io {
            path: Some(path.to_path_buf()),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The typed HTTP error, when the server answered with a non-2xx status.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            ClientError::Http(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connect: error.is_connect(),
            source: error,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for ClientError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        ClientError::Io {
            path: None,
            source: error,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for ClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
