//! Shared building blocks for the typed HTTP client.
//!
//! This crate holds the pieces every other crate leans on: error location
//! tracking, the HTTP status taxonomy, and the redacted bearer token.
//!
//! ## Architecture
//!
//! - **common** (this crate): Error plumbing and the status taxonomy
//! - **models**: The encodable value model
//! - **typed-client**: Encoders, decoders and the request client
//! - **typed-http**: Command-line front end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::{HttpStatusCode, StatusFamily, StatusKind};
pub use redacted_token::RedactedToken;
