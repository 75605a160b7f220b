// Unit tests for the status taxonomy

use crate::{HttpStatusCode, StatusFamily, StatusKind};

use std::collections::HashSet;

/// **VALUE**: Verifies every code the client promises to classify has exactly one kind.
///
/// **WHY THIS MATTERS**: A missing entry silently degrades a typed error (e.g. `NotFound`)
/// into the generic fallback, so callers matching on kinds would miss it.
///
/// **BUG THIS CATCHES**: Would catch a dropped or duplicated taxonomy row.
#[test]
fn given_documented_codes_when_looked_up_then_each_maps_to_unique_kind() {
    // GIVEN: The documented redirect/client/server ranges
    let mut codes: Vec<u16> = vec![300, 301, 302, 303, 304, 305, 307, 308];
    codes.extend(400..=418);
    codes.extend(421..=426);
    codes.extend([428, 429, 431, 451]);
    codes.extend(500..=511);

    // WHEN: Looking up each code
    let kinds: Vec<StatusKind> = codes
        .iter()
        .map(|&code| StatusKind::from_code(code).unwrap_or_else(|| panic!("{code} unmapped")))
        .collect();

    // THEN: Every kind is distinct and round-trips to its code
    let unique: HashSet<_> = kinds.iter().collect();
    assert_eq!(unique.len(), kinds.len(), "Kinds should be unique");
    for (code, kind) in codes.iter().zip(&kinds) {
        assert_eq!(kind.code(), *code, "{kind:?} should be fixed to {code}");
    }
    assert_eq!(StatusKind::all().count(), codes.len());
}

/// **VALUE**: 306 is reserved and must stay unmapped, as must codes outside the table.
#[test]
fn given_reserved_or_unknown_code_when_looked_up_then_returns_none() {
    assert_eq!(StatusKind::from_code(306), None);
    assert_eq!(StatusKind::from_code(419), None);
    assert_eq!(StatusKind::from_code(599), None);
    assert_eq!(StatusKind::from_code(200), None);
}

#[test]
fn given_kinds_when_family_requested_then_matches_code_range() {
    assert_eq!(StatusKind::Found.family(), StatusFamily::Redirect);
    assert_eq!(StatusKind::NotFound.family(), StatusFamily::ClientError);
    assert_eq!(StatusKind::UnavailableForLegalReasons.family(), StatusFamily::ClientError);
    assert_eq!(StatusKind::NetworkAuthenticationRequired.family(), StatusFamily::ServerError);
}

#[test]
fn given_kind_when_displayed_then_shows_code_and_reason() {
    assert_eq!(StatusKind::NotFound.to_string(), "404 Not Found");
    assert_eq!(StatusKind::NotFound.name(), "NotFound");
    assert_eq!(StatusKind::ImATeapot.reason(), "I'm a teapot");
}

#[test]
fn given_status_code_when_classified_then_family_helpers_agree() {
    let ok = HttpStatusCode(204);
    let moved = HttpStatusCode::from(StatusKind::MovedPermanently);
    let teapot = HttpStatusCode(418);
    let bad_gateway = HttpStatusCode(502);

    assert!(ok.is_success() && ok.kind().is_none());
    assert!(moved.is_redirect());
    assert_eq!(moved.0, 301);
    assert!(teapot.is_client_error());
    assert_eq!(teapot.kind(), Some(StatusKind::ImATeapot));
    assert!(bad_gateway.is_server_error());
    assert_eq!(bad_gateway.family(), StatusFamily::ServerError);
}
