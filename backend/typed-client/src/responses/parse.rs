use super::{ByteStream, Schema};

use crate::error::{ClientError, ParseError};

use common::ErrorLocation;

use std::any::type_name;
use std::panic::Location;

use log::warn;
use reqwest::Response;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn parse_raw(response: Response) -> ByteStream {
    Box::pin(response.bytes_stream())
}

/// Body as text. `charset` applies when the response does not declare one.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] if the body cannot be read.
pub async fn parse_text(response: Response, charset: &str) -> Result<String, ClientError> {
    Ok(response.text_with_charset(charset).await?)
}

/// Body as JSON, whatever content type the server declared.
///
/// An empty body decodes to `null`.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] (carrying the raw text) if the body is not
/// valid JSON.
pub async fn parse_json(response: Response) -> Result<Value, ClientError> {
    if !is_json_content_type(response.headers()) {
        warn!(
            "Decoding JSON from {} with content type {:?}",
            response.url(),
            response.headers().get(CONTENT_TYPE)
        );
    }

    let text = response.text().await?;
    Ok(decode_json_text(text)?)
}

/// Body as JSON validated into `T`.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] without a schema,
/// [`ClientError::Parse`] for invalid JSON and [`ClientError::Validation`] if
/// the JSON does not fit `T`.
pub async fn parse_model<T: DeserializeOwned>(
    response: Response,
    schema: Option<Schema<T>>,
) -> Result<T, ClientError> {
    if schema.is_none() {
        return Err(ClientError::configuration(
            "model decoding needs a response schema",
        ));
    }

    let json = parse_json(response).await?;
    serde_json::from_value(json)
        .map_err(|e| ClientError::validation(format!("{}: {e}", type_name::<T>())))
}

pub(crate) fn decode_json_text(text: String) -> Result<Value, ParseError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| ParseError::InvalidJson {
        message: e.to_string(),
        raw_response: text,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// `application/json` or any `+json` media type.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|media| {
            media.type_() == mime::APPLICATION
                && (media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON))
        })
}
