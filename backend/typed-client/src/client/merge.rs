//! Call-local merging of client defaults with per-call overrides.
//!
//! Defaults are only read; every merge builds a fresh collection.

use crate::encoders::{EncoderOptions, encode_url};
use crate::error::ClientError;

use models::EncodableValue;

use std::collections::HashSet;

use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};

/// Encode headers, cookies or params to flat `(key, value)` pairs.
pub(crate) fn url_pairs(value: &EncodableValue) -> Result<Vec<(String, String)>, ClientError> {
    Ok(encode_url(value, &EncoderOptions::for_url())?.into_pairs()?)
}

#[track_caller]
pub(crate) fn header_map(pairs: Vec<(String, String)>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::configuration(format!("invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(&value)
            .map_err(|e| ClientError::configuration(format!("invalid value for header '{name}': {e}")))?;
        headers.append(header_name, header_value);
    }
    Ok(headers)
}

/// Defaults overlaid with `overrides`: a header named in `overrides` replaces
/// every default value of that header.
pub(crate) fn merge_headers(defaults: &HeaderMap, overrides: HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    for name in overrides.keys() {
        merged.remove(name);
    }
    for (name, value) in &overrides {
        merged.append(name.clone(), value.clone());
    }
    merged
}

/// Defaults overlaid with `overrides` by key, keeping first-seen key order.
///
/// A key present in `overrides` drops every default entry for that key; list
/// values therefore replace rather than extend.
pub(crate) fn merge_pairs(
    defaults: &[(String, String)],
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = {
        let overridden: HashSet<&str> = overrides.iter().map(|(key, _)| key.as_str()).collect();
        defaults
            .iter()
            .filter(|(key, _)| !overridden.contains(key.as_str()))
            .cloned()
            .collect()
    };
    merged.extend(overrides);
    merged
}

/// Fold cookies into a single `Cookie` header, after any cookie header the
/// caller set explicitly.
#[track_caller]
pub(crate) fn apply_cookies(
    headers: &mut HeaderMap,
    cookies: &[(String, String)],
) -> Result<(), ClientError> {
    if cookies.is_empty() {
        return Ok(());
    }

    let mut parts: Vec<String> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect();
    for (name, value) in cookies {
        check_cookie(name, value)?;
        parts.push(format!("{name}={value}"));
    }

    let value = HeaderValue::from_str(&parts.join("; "))
        .map_err(|e| ClientError::configuration(format!("invalid cookie: {e}")))?;
    headers.insert(COOKIE, value);
    Ok(())
}

/// Reject names and values outside RFC 6265, so a value such as `a; admin=1`
/// cannot smuggle in extra cookies.
#[track_caller]
fn check_cookie(name: &str, value: &str) -> Result<(), ClientError> {
    if name.is_empty() || !name.bytes().all(is_token_byte) {
        return Err(ClientError::configuration(format!(
            "invalid cookie name '{name}'"
        )));
    }

    let unquoted = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value);
    if !unquoted.bytes().all(is_cookie_octet) {
        return Err(ClientError::configuration(format!(
            "invalid value for cookie '{name}'"
        )));
    }
    Ok(())
}

fn is_token_byte(byte: u8) -> bool {
    byte.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&byte)
}

fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
