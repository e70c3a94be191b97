//! The proxy pipeline.
//!
//! # Steps
//! ```text
//! method check (GET only)        → 405
//! credential configured?         → 500
//! parse query, sanitize apikey
//! validate what/name/lat         → 400
//! one upstream GET under deadline → 504 on expiry
//! upstream non-2xx               → same status, error envelope
//! parse JSON body                → 500 on failure
//! result == "fail"               → 400, upstream body verbatim
//! success                        → 200, upstream body + Cache-Control
//! ```
//!
//! Every step returns early with a [`ProxyError`]; the caller renders it.

use axum::{
    http::{Method, StatusCode},
    response::Response,
};
use serde_json::Value;

use crate::error::ProxyError;
use crate::http::response::json_response;
use crate::http::server::AppState;
use crate::params::{sanitize, validate, QueryParams, Validation};

/// Sentinel the upstream puts in `result` on an application-level error.
pub const UPSTREAM_FAIL: &str = "fail";

/// Forward one request to the upstream API.
pub async fn forward(
    state: &AppState,
    method: &Method,
    query: Option<&str>,
) -> Result<Response, ProxyError> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }

    let api_key = state
        .config
        .upstream
        .api_key()
        .ok_or(ProxyError::NotConfigured)?;

    let mut params = QueryParams::parse(query.unwrap_or(""));
    sanitize(&mut params, api_key);

    if let Validation::Invalid(reason) = validate(&params) {
        return Err(ProxyError::InvalidParameter(reason));
    }

    tracing::debug!(
        what = params.get("what").unwrap_or_default(),
        params = params.len(),
        "Forwarding to upstream"
    );

    let reply = state.upstream.fetch(&params).await?;

    if !reply.status.is_success() {
        tracing::warn!(status = %reply.status, "Upstream returned error status");
        return Err(ProxyError::upstream_http(reply.status, reply.reason));
    }

    let body: Value = serde_json::from_slice(&reply.body)?;

    if is_application_failure(&body) {
        tracing::debug!("Upstream reported application-level failure");
        return Err(ProxyError::UpstreamApplication(body));
    }

    let cache_control = state.config.cache.header_value();
    Ok(json_response(StatusCode::OK, body, Some(&cache_control)))
}

/// True when the upstream signalled failure inside a 2xx body.
pub fn is_application_failure(body: &Value) -> bool {
    body.get("result").and_then(Value::as_str) == Some(UPSTREAM_FAIL)
}
