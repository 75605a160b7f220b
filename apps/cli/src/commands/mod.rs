//! Command execution against a configured [`Client`].

use crate::cli::Command;
use crate::error::CliError;

use typed_client::{Client, Decoded, EncodableValue, RequestOptions, ResponseClass};

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use log::{debug, info};
use serde_json::Value;

/// What a command prints on success.
#[derive(Debug, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
    File(PathBuf),
    Empty,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
            Output::Text(text) => f.write_str(text),
            Output::File(path) => write!(f, "{}", path.display()),
            Output::Empty => Ok(()),
        }
    }
}

impl From<Decoded> for Output {
    fn from(decoded: Decoded) -> Self {
        match decoded {
            Decoded::Json(value) | Decoded::Model(value) => Output::Json(value),
            Decoded::Text(text) => Output::Text(text),
            Decoded::File(path) => Output::File(path),
            Decoded::Raw(_) | Decoded::None => Output::Empty,
        }
    }
}

/// Group repeated keys into lists so every value is sent.
pub fn pairs_to_value(pairs: Vec<(String, String)>) -> EncodableValue {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }

    let entries: BTreeMap<String, EncodableValue> = grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                EncodableValue::from(values.remove(0))
            } else {
                EncodableValue::from(values)
            };
            (key, value)
        })
        .collect();
    EncodableValue::from(entries)
}

pub async fn execute(client: &Client, command: Command) -> Result<Output, CliError> {
    match command {
        Command::Get {
            path,
            query,
            headers,
            text,
        } => {
            let mut options = RequestOptions::new();
            if !query.is_empty() {
                options = options.with_params(pairs_to_value(query));
            }
            if !headers.is_empty() {
                options = options.with_headers(pairs_to_value(headers));
            }
            if text {
                options = options.with_response_class(ResponseClass::PlainText);
            }

            debug!("GET {path}");
            Ok(client.get(&path, options).await?.into())
        }
        Command::Download { path, output } => {
            let decoded = client
                .download_file(&path, output.as_deref(), RequestOptions::new())
                .await?;
            if let Decoded::File(ref written) = decoded {
                info!("Saved {} to {}", path, written.display());
            }
            Ok(decoded.into())
        }
        Command::Upload {
            path,
            file,
            field,
            stream,
        } => {
            if !file.is_file() {
                return Err(CliError::cli(format!("{} is not a file", file.display())));
            }

            let decoded = if stream {
                client.stream_file(&path, &file, RequestOptions::new()).await?
            } else {
                client
                    .upload_file(&path, &file, &field, RequestOptions::new())
                    .await?
            };
            Ok(decoded.into())
        }
    }
}
