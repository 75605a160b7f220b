//! Built-in conversions for domain scalars.
//!
//! Each entry maps one family of values onto a plain value (string, number or
//! list) that the dispatcher then renders for the target format. Entries are
//! tried in order and the first one that claims a value wins.

use crate::error::EncodingError;

use common::ErrorLocation;
use models::{EncodableValue, SequenceKind};

use std::panic::Location;

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;

/// Placeholder emitted for non-empty secrets.
pub const SECRET_MASK: &str = "**********";

type TryEncode = fn(&EncodableValue) -> Option<Result<EncodableValue, EncodingError>>;

pub(crate) static BUILTIN_ENCODERS: &[(&str, TryEncode)] = &[
    ("bytes", encode_bytes),
    ("date", encode_date),
    ("time", encode_time),
    ("datetime", encode_datetime),
    ("duration", encode_duration),
    ("decimal", encode_decimal),
    ("uuid", encode_uuid),
    ("ip", encode_ip),
    ("pattern", encode_pattern),
    ("secret", encode_secret),
    ("color", encode_color),
    ("url", encode_url),
    ("collection", encode_collection),
];

/// Plain form of `value`, or `None` if no entry claims it.
pub(crate) fn encode_builtin(
    value: &EncodableValue,
) -> Option<Result<EncodableValue, EncodingError>> {
    BUILTIN_ENCODERS
        .iter()
        .find_map(|(_, try_encode)| try_encode(value))
}

fn text(value: impl ToString) -> Option<Result<EncodableValue, EncodingError>> {
    Some(Ok(EncodableValue::Str(value.to_string())))
}

fn encode_bytes(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    let EncodableValue::Bytes(bytes) = value else {
        return None;
    };
    Some(
        String::from_utf8(bytes.clone())
            .map(EncodableValue::Str)
            .map_err(|e| EncodingError::InvalidText {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
    )
}

fn encode_date(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Date(date) => text(date.format("%Y-%m-%d")),
        _ => None,
    }
}

fn encode_time(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Time(time) => text(iso_time(time)),
        _ => None,
    }
}

fn encode_datetime(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::DateTime(datetime) => text(iso_naive_datetime(datetime)),
        EncodableValue::DateTimeTz(datetime) => text(iso_datetime(datetime)),
        _ => None,
    }
}

fn encode_duration(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Duration(delta) => Some(Ok(EncodableValue::Float(total_seconds(delta)))),
        _ => None,
    }
}

fn encode_decimal(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Decimal(decimal) => Some(decimal_to_number(decimal)),
        _ => None,
    }
}

fn encode_uuid(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Uuid(uuid) => text(uuid.hyphenated()),
        _ => None,
    }
}

fn encode_ip(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::IpAddr(addr) => text(addr),
        EncodableValue::IpNetwork(network) => text(network),
        _ => None,
    }
}

fn encode_pattern(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Pattern(pattern) => text(pattern.as_str()),
        _ => None,
    }
}

fn encode_secret(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    let is_empty = match value {
        EncodableValue::SecretStr(secret) => secret.expose_secret().is_empty(),
        EncodableValue::SecretBytes(secret) => secret.expose_secret().is_empty(),
        _ => return None,
    };
    text(if is_empty { "" } else { SECRET_MASK })
}

fn encode_color(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Color(color) => text(color),
        _ => None,
    }
}

fn encode_url(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Url(url) => text(url.as_str()),
        _ => None,
    }
}

fn encode_collection(value: &EncodableValue) -> Option<Result<EncodableValue, EncodingError>> {
    match value {
        EncodableValue::Sequence(SequenceKind::FrozenSet | SequenceKind::Deque, items) => Some(
            Ok(EncodableValue::Sequence(SequenceKind::List, items.clone())),
        ),
        _ => None,
    }
}

// ============================================
// FORMATTING HELPERS
// ============================================

fn iso_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S%.f").to_string()
}

fn iso_naive_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

fn iso_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub(crate) fn total_seconds(delta: &TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1_000_000_000.0
}

/// Integer when the stored representation has no fractional digits, float otherwise.
///
/// A whole number outside the 64-bit range is an error rather than a lossy float.
#[track_caller]
pub(crate) fn decimal_to_number(decimal: &Decimal) -> Result<EncodableValue, EncodingError> {
    if decimal.scale() == 0 {
        if let Some(int) = decimal.to_i64() {
            return Ok(EncodableValue::Int(int));
        }
        if let Some(uint) = decimal.to_u64() {
            return Ok(EncodableValue::UInt(uint));
        }
        return Err(EncodingError::PrecisionLoss {
            message: format!("integral decimal {decimal} does not fit in 64 bits"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(EncodableValue::Float(decimal.to_f64().unwrap_or(f64::NAN)))
}
