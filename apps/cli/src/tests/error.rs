// Unit tests for CliError conversions

use crate::error::CliError;

use typed_client::{ClientError, ConfigError, ErrorPayload, HttpError};

use serde_json::json;

/// **VALUE**: HTTP failures keep their typed form so `main` can print status and payload.
///
/// **BUG THIS CATCHES**: Would catch the status being flattened into a string,
/// which loses the exit-path formatting.
#[test]
fn given_http_client_error_when_converted_then_stays_typed() {
    // GIVEN: A 404 from the client
    let error = ClientError::Http(HttpError::new(404, ErrorPayload::Json(json!({"detail": "x"}))));

    // WHEN: Converting to a CLI error
    let cli = CliError::from(error);

    // THEN: The HTTP error is carried through
    match cli {
        CliError::Http(http) => assert_eq!(http.status_code(), 404),
        other => panic!("expected HTTP variant, got {other:?}"),
    }
}

#[test]
fn given_other_client_error_when_converted_then_request_error_with_location() {
    let cli = CliError::from(ClientError::configuration("body and data"));

    let rendered = cli.to_string();
    assert!(rendered.starts_with("Request Error"));
    assert!(rendered.contains("body and data"));
    assert!(rendered.contains("error.rs"));
}

#[test]
fn given_config_error_when_converted_then_config_variant() {
    let cli = CliError::from(ConfigError::ValidationError {
        reason: "timeout".to_string(),
        location: common::ErrorLocation::from(std::panic::Location::caller()),
    });

    assert!(matches!(cli, CliError::Config { ref message, .. } if message.contains("timeout")));
}
