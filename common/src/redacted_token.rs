//! Bearer token handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use secrecy::{ExposeSecret, SecretString};
use serde::ser::Error;
use zeroize::Zeroize;

const BEARER_PREFIX: &str = "Bearer ";

/// A bearer token that never exposes its value in logs or debug output.
///
/// Accepts either a plain string or a [`SecretString`]; the secret form is
/// unwrapped exactly once, when the token is created.
#[derive(Clone)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    /// Create a new redacted token from a plain string.
    pub fn new(token: String) -> Self {
        Self { inner: token }
    }

    /// Get the actual token value for transmission.
    ///
    /// # Security Note
    /// Only call this when actually building the `Authorization` header.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Full `Authorization` header value (`Bearer <token>`).
    pub fn authorization_value(&self) -> String {
        format!("{BEARER_PREFIX}{}", self.inner)
    }

    /// Get the token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the token is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Reject tokens that cannot travel in an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns [`RedactError::InvalidToken`] if the token is empty or contains
    /// characters outside visible ASCII.
    #[track_caller]
    pub fn validate(&self) -> Result<(), RedactError> {
        if self.inner.is_empty() {
            return Err(RedactError::InvalidToken {
                message: String::from("bearer token is empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !self.inner.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(RedactError::InvalidToken {
                message: format!(
                    "bearer token of length {} contains non-printable or whitespace characters",
                    self.inner.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

impl From<String> for RedactedToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for RedactedToken {
    fn from(token: &str) -> Self {
        Self::new(token.to_string())
    }
}

impl From<SecretString> for RedactedToken {
    fn from(secret: SecretString) -> Self {
        Self::new(secret.expose_secret().to_string())
    }
}

impl From<&SecretString> for RedactedToken {
    fn from(secret: &SecretString) -> Self {
        Self::new(secret.expose_secret().to_string())
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
