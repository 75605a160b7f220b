//! Value encoders.
//!
//! [`encode_json`] turns an [`models::EncodableValue`] into JSON for request
//! bodies; [`encode_url`] turns it into strings for headers, cookies and query
//! parameters. Both share one dispatcher and differ only in how leaves render.

mod builtin;
mod dispatch;
mod json;
mod options;
mod url_safe;

pub use builtin::SECRET_MASK;
pub use json::{encode_json, to_json_string};
pub use options::{EncoderOptions, RESERVED_KEY_PREFIX};
pub use url_safe::{UrlValue, encode_url};
