//! Cross-origin headers.
//!
//! Every response, successful or not, carries the same fixed set so that
//! browser clients on any origin can read it.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// The fixed cross-origin header set.
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, HEAD, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

/// Insert the cross-origin headers, replacing any existing values.
pub fn apply_cors(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
