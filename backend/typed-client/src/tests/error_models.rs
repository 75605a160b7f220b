// Unit tests for the error model registry

use crate::client::ErrorModels;
use crate::error::ClientError;

use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct NotFoundBody {
    detail: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ConflictBody {
    code: u32,
}

#[test]
fn given_no_registered_model_when_payload_built_then_json_kept() {
    let models = ErrorModels::new().with::<NotFoundBody>(404);

    let payload = models.payload(500, json!({"oops": true})).unwrap();

    assert_eq!(payload.as_json(), Some(&json!({"oops": true})));
    assert!(payload.downcast_ref::<NotFoundBody>().is_none());
}

/// **VALUE**: A registered model is validated and can be recovered by type.
///
/// **BUG THIS CATCHES**: Would catch `as_any` being dispatched on the `Arc` wrapper,
/// which makes every downcast fail.
#[test]
fn given_registered_model_when_payload_built_then_downcasts_to_model() {
    let models = ErrorModels::new().with::<NotFoundBody>(404);

    let payload = models.payload(404, json!({"detail": "missing"})).unwrap();

    assert_eq!(
        payload.downcast_ref::<NotFoundBody>(),
        Some(&NotFoundBody {
            detail: "missing".to_string()
        })
    );
    assert!(payload.as_json().is_none());
}

#[test]
fn given_mismatched_body_when_payload_built_then_returns_validation_error() {
    let models = ErrorModels::new().with::<NotFoundBody>(404);

    let result = models.payload(404, json!({"unexpected": 1}));

    assert!(matches!(result, Err(ClientError::Validation { .. })));
}

#[test]
fn given_client_and_call_models_when_merged_then_call_wins() {
    let client = ErrorModels::new()
        .with::<NotFoundBody>(404)
        .with::<NotFoundBody>(409);
    let call = ErrorModels::new().with::<ConflictBody>(409);

    let merged = client.merged_with(&call);
    let payload = merged.payload(409, json!({"code": 7})).unwrap();

    assert_eq!(merged.len(), 2);
    assert_eq!(payload.downcast_ref::<ConflictBody>(), Some(&ConflictBody { code: 7 }));
    assert!(client.contains(404) && !call.contains(404));
}
