use crate::RedactedToken;

use secrecy::SecretString;

/// **VALUE**: Verifies the token never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Clients are logged at debug level; a token in a log file is a
/// credential leak.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = RedactedToken::from("super-secret-value");

    // WHEN: Formatting it
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither output contains the value
    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert_eq!(token.len(), 18, "Length is safe to expose");
}

/// **VALUE**: Verifies a secret-wrapped token is unwrapped into the same header value
/// as the plain form.
#[test]
fn given_secret_and_plain_tokens_when_header_built_then_values_match() {
    let plain = RedactedToken::from(String::from("abc123"));
    let secret = RedactedToken::from(SecretString::from("abc123"));

    assert_eq!(plain.authorization_value(), "Bearer abc123");
    assert_eq!(secret.authorization_value(), plain.authorization_value());
}

/// **VALUE**: Serialization must fail instead of writing the token to disk or the wire.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::from("abc123");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "Serialization should be refused");
}

#[test]
fn given_token_with_whitespace_when_validated_then_returns_error() {
    assert!(RedactedToken::from("abc 123").validate().is_err());
    assert!(RedactedToken::from("").validate().is_err());
    assert!(RedactedToken::from("abc.123-XYZ_").validate().is_ok());
}
