use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures decoding a response body.
#[derive(Debug, ThisError)]
pub enum ParseError {
    /// The body was not valid JSON; `raw_response` holds it verbatim.
    #[error("Response Parse Error: {message} {location}")]
    InvalidJson {
        message: String,
        raw_response: String,
        location: ErrorLocation,
    },
}

impl ParseError {
    /// Raw body text, for callers that want to show what the server sent.
    pub fn raw_response(&self) -> &str {
        match self {
            ParseError::InvalidJson { raw_response, .. } => raw_response,
        }
    }
}
