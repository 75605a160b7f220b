use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures turning an [`models::EncodableValue`] into its JSON-safe or URL-safe form.
#[derive(Debug, ThisError)]
pub enum EncodingError {
    /// Neither the mapping view nor the attribute view of an object worked.
    #[error("Unconvertible Value Error: {type_name}: [{}] {location}", .errors.join("; "))]
    Unconvertible {
        type_name: String,
        errors: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Invalid Text Error: {message} {location}")]
    InvalidText {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported Key Error: {message} {location}")]
    UnsupportedKey {
        message: String,
        location: ErrorLocation,
    },

    /// A whole number too large for an exact JSON integer.
    #[error("Precision Loss Error: {message} {location}")]
    PrecisionLoss {
        message: String,
        location: ErrorLocation,
    },

    #[error("Non-Finite Float Error: {value} {location}")]
    NonFiniteFloat { value: f64, location: ErrorLocation },

    /// A header, cookie or query value that is not a string or a list of strings.
    #[error("Not Flat Error: {message} {location}")]
    NotFlat {
        message: String,
        location: ErrorLocation,
    },
}
