//! HTTP status codes and the taxonomy of typed error kinds.
//!
//! Every redirect, client-error and server-error code the client knows about
//! maps to exactly one [`StatusKind`]. Codes outside the table (including the
//! reserved 306) have no kind; callers fall back to a generic error that only
//! carries the raw status.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Coarse family a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFamily {
    Informational,
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusFamily {
    pub fn of(code: u16) -> Self {
        match code {
            100..=199 => StatusFamily::Informational,
            200..=299 => StatusFamily::Success,
            300..=399 => StatusFamily::Redirect,
            400..=499 => StatusFamily::ClientError,
            500..=599 => StatusFamily::ServerError,
            _ => StatusFamily::Unknown,
        }
    }
}

/// One concrete error kind per mapped status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    // 3xx
    MultipleChoices,
    MovedPermanently,
    Found,
    SeeOther,
    NotModified,
    UseProxy,
    TemporaryRedirect,
    PermanentRedirect,
    // 4xx
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeout,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    RequestEntityTooLarge,
    RequestUriTooLong,
    UnsupportedMediaType,
    RequestedRangeNotSatisfiable,
    ExpectationFailed,
    ImATeapot,
    MisdirectedRequest,
    UnprocessableEntity,
    Locked,
    FailedDependency,
    TooEarly,
    UpgradeRequired,
    PreconditionRequired,
    TooManyRequests,
    RequestHeaderFieldsTooLarge,
    UnavailableForLegalReasons,
    // 5xx
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    HttpVersionNotSupported,
    VariantAlsoNegotiates,
    InsufficientStorage,
    LoopDetected,
    BandwidthLimitExceeded,
    NotExtended,
    NetworkAuthenticationRequired,
}

/// The taxonomy: (code, kind, reason phrase).
const TAXONOMY: &[(u16, StatusKind, &str)] = &[
    (300, StatusKind::MultipleChoices, "Multiple Choices"),
    (301, StatusKind::MovedPermanently, "Moved Permanently"),
    (302, StatusKind::Found, "Found"),
    (303, StatusKind::SeeOther, "See Other"),
    (304, StatusKind::NotModified, "Not Modified"),
    (305, StatusKind::UseProxy, "Use Proxy"),
    // 306 is reserved and deliberately absent
    (307, StatusKind::TemporaryRedirect, "Temporary Redirect"),
    (308, StatusKind::PermanentRedirect, "Permanent Redirect"),
    (400, StatusKind::BadRequest, "Bad Request"),
    (401, StatusKind::Unauthorized, "Unauthorized"),
    (402, StatusKind::PaymentRequired, "Payment Required"),
    (403, StatusKind::Forbidden, "Forbidden"),
    (404, StatusKind::NotFound, "Not Found"),
    (405, StatusKind::MethodNotAllowed, "Method Not Allowed"),
    (406, StatusKind::NotAcceptable, "Not Acceptable"),
    (407, StatusKind::ProxyAuthenticationRequired, "Proxy Authentication Required"),
    (408, StatusKind::RequestTimeout, "Request Timeout"),
    (409, StatusKind::Conflict, "Conflict"),
    (410, StatusKind::Gone, "Gone"),
    (411, StatusKind::LengthRequired, "Length Required"),
    (412, StatusKind::PreconditionFailed, "Precondition Failed"),
    (413, StatusKind::RequestEntityTooLarge, "Request Entity Too Large"),
    (414, StatusKind::RequestUriTooLong, "Request-URI Too Long"),
    (415, StatusKind::UnsupportedMediaType, "Unsupported Media Type"),
    (416, StatusKind::RequestedRangeNotSatisfiable, "Requested Range Not Satisfiable"),
    (417, StatusKind::ExpectationFailed, "Expectation Failed"),
    (418, StatusKind::ImATeapot, "I'm a teapot"),
    (421, StatusKind::MisdirectedRequest, "Misdirected Request"),
    (422, StatusKind::UnprocessableEntity, "Unprocessable Entity"),
    (423, StatusKind::Locked, "Locked"),
    (424, StatusKind::FailedDependency, "Failed Dependency"),
    (425, StatusKind::TooEarly, "Too Early"),
    (426, StatusKind::UpgradeRequired, "Upgrade Required"),
    (428, StatusKind::PreconditionRequired, "Precondition Required"),
    (429, StatusKind::TooManyRequests, "Too Many Requests"),
    (431, StatusKind::RequestHeaderFieldsTooLarge, "Request Header Fields Too Large"),
    (451, StatusKind::UnavailableForLegalReasons, "Unavailable For Legal Reasons"),
    (500, StatusKind::InternalServerError, "Internal Server Error"),
    (501, StatusKind::NotImplemented, "Not Implemented"),
    (502, StatusKind::BadGateway, "Bad Gateway"),
    (503, StatusKind::ServiceUnavailable, "Service Unavailable"),
    (504, StatusKind::GatewayTimeout, "Gateway Timeout"),
    (505, StatusKind::HttpVersionNotSupported, "HTTP Version Not Supported"),
    (506, StatusKind::VariantAlsoNegotiates, "Variant Also Negotiates"),
    (507, StatusKind::InsufficientStorage, "Insufficient Storage"),
    (508, StatusKind::LoopDetected, "Loop Detected"),
    (509, StatusKind::BandwidthLimitExceeded, "Bandwidth Limit Exceeded"),
    (510, StatusKind::NotExtended, "Not Extended"),
    (511, StatusKind::NetworkAuthenticationRequired, "Network Authentication Required"),
];

static BY_CODE: Lazy<HashMap<u16, (StatusKind, &'static str)>> = Lazy::new(|| {
    TAXONOMY
        .iter()
        .map(|&(code, kind, reason)| (code, (kind, reason)))
        .collect()
});

static BY_KIND: Lazy<HashMap<StatusKind, (u16, &'static str)>> = Lazy::new(|| {
    TAXONOMY
        .iter()
        .map(|&(code, kind, reason)| (kind, (code, reason)))
        .collect()
});

impl StatusKind {
    /// Look up the kind for a status code. `None` for unmapped codes.
    pub fn from_code(code: u16) -> Option<Self> {
        BY_CODE.get(&code).map(|&(kind, _)| kind)
    }

    /// Every kind in taxonomy order.
    pub fn all() -> impl Iterator<Item = StatusKind> {
        TAXONOMY.iter().map(|&(_, kind, _)| kind)
    }

    /// The status code this kind is fixed to.
    pub fn code(self) -> u16 {
        BY_KIND.get(&self).map(|&(code, _)| code).unwrap_or_default()
    }

    pub fn reason(self) -> &'static str {
        BY_KIND.get(&self).map(|&(_, reason)| reason).unwrap_or_default()
    }

    pub fn family(self) -> StatusFamily {
        StatusFamily::of(self.code())
    }

    /// Variant name, e.g. `"NotFound"`.
    pub fn name(self) -> String {
        format!("{self:?}")
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// HTTP status code for error categorization.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 3xx redirects.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    pub fn family(&self) -> StatusFamily {
        StatusFamily::of(self.0)
    }

    /// Typed error kind, if the code is part of the taxonomy.
    pub fn kind(&self) -> Option<StatusKind> {
        StatusKind::from_code(self.0)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl From<StatusKind> for HttpStatusCode {
    fn from(kind: StatusKind) -> Self {
        HttpStatusCode(kind.code())
    }
}

impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
