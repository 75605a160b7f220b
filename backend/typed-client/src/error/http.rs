//! Typed errors for non-2xx responses.
//!
//! Key design decisions:
//! - The kind comes from the static status taxonomy; unmapped codes keep `kind: None`
//! - The payload is the parsed JSON body, or a registered error model built from it
//! - All errors include ErrorLocation for debugging

use common::{ErrorLocation, HttpStatusCode, StatusKind};

use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error as ThisError;

/// A typed error body registered for a status code.
///
/// Implemented for every `Debug + Send + Sync + 'static` type, so any
/// `Deserialize` struct qualifies.
pub trait ErrorModel: fmt::Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Debug + Send + Sync + 'static> ErrorModel for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Body carried by an [`HttpError`].
#[derive(Debug, Clone)]
pub enum ErrorPayload {
    Json(Value),
    Model(Arc<dyn ErrorModel>),
}

impl ErrorPayload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ErrorPayload::Json(value) => Some(value),
            ErrorPayload::Model(_) => None,
        }
    }

    /// The registered error model, if it has type `E`.
    pub fn downcast_ref<E: 'static>(&self) -> Option<&E> {
        match self {
            ErrorPayload::Model(model) => {
                let model: &dyn ErrorModel = model.as_ref();
                model.as_any().downcast_ref::<E>()
            }
            ErrorPayload::Json(_) => None,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{value}"),
            ErrorPayload::Model(model) => write!(f, "{model:?}"),
        }
    }
}

/// A non-2xx response.
#[derive(Debug, ThisError)]
#[error("HTTP Error: {} {response} {location}", describe_status(.status, .kind))]
pub struct HttpError {
    pub status: HttpStatusCode,
    pub kind: Option<StatusKind>,
    pub response: ErrorPayload,
    pub location: ErrorLocation,
}

fn describe_status(status: &HttpStatusCode, kind: &Option<StatusKind>) -> String {
    match kind {
        Some(kind) => kind.to_string(),
        None => status.to_string(),
    }
}

impl HttpError {
    #[track_caller]
    pub fn new(status: u16, response: ErrorPayload) -> Self {
        Self {
            status: HttpStatusCode::from(status),
            kind: StatusKind::from_code(status),
            response,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.0
    }

    pub fn is_kind(&self, kind: StatusKind) -> bool {
        self.kind == Some(kind)
    }
}
