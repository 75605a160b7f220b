use crate::error::{ClientError, ErrorModel, ErrorPayload};

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

type ErrorDecoder = Arc<dyn Fn(Value) -> Result<Arc<dyn ErrorModel>, serde_json::Error> + Send + Sync>;

#[derive(Clone)]
struct Entry {
    type_name: &'static str,
    decode: ErrorDecoder,
}

/// Typed error bodies keyed by status code.
#[derive(Clone, Default)]
pub struct ErrorModels {
    entries: HashMap<u16, Entry>,
}

impl ErrorModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode error bodies for `status` into `E`.
    pub fn with<E>(mut self, status: u16) -> Self
    where
        E: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        self.insert::<E>(status);
        self
    }

    pub fn insert<E>(&mut self, status: u16)
    where
        E: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        let decode: ErrorDecoder = Arc::new(|json| {
            serde_json::from_value::<E>(json).map(|model| Arc::new(model) as Arc<dyn ErrorModel>)
        });
        self.entries.insert(
            status,
            Entry {
                type_name: type_name::<E>(),
                decode,
            },
        );
    }

    pub fn contains(&self, status: u16) -> bool {
        self.entries.contains_key(&status)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of `self` and `overrides`; entries in `overrides` win on the same status.
    pub fn merged_with(&self, overrides: &ErrorModels) -> ErrorModels {
        let mut merged = self.clone();
        merged.entries.extend(
            overrides
                .entries
                .iter()
                .map(|(status, entry)| (*status, entry.clone())),
        );
        merged
    }

    /// Payload for an error body: the registered model when there is one,
    /// otherwise the JSON itself.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the body does not fit the
    /// registered model.
    pub(crate) fn payload(&self, status: u16, json: Value) -> Result<ErrorPayload, ClientError> {
        let Some(entry) = self.entries.get(&status) else {
            return Ok(ErrorPayload::Json(json));
        };

        (entry.decode)(json)
            .map(ErrorPayload::Model)
            .map_err(|e| {
                ClientError::validation(format!(
                    "error body for status {status} does not match {}: {e}",
                    entry.type_name
                ))
            })
    }
}

impl fmt::Debug for ErrorModels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut statuses: Vec<_> = self.entries.iter().collect();
        statuses.sort_unstable_by_key(|(status, _)| **status);
        f.debug_map()
            .entries(statuses.into_iter().map(|(status, entry)| (status, entry.type_name)))
            .finish()
    }
}
