//! Client-visible failure taxonomy.
//!
//! Each variant maps to one status code and one message. Rendering goes
//! through [`crate::http::response`], so every failure carries the error
//! envelope and the cross-origin headers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::http::response::{error_response, json_response};
use crate::upstream::UpstreamError;

/// Message shown for any fault the pipeline did not anticipate.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed. Use GET.")]
    MethodNotAllowed,

    #[error("APRS_API_KEY not configured. Please set the worker secret.")]
    NotConfigured,

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Request timeout. APRS.fi API did not respond in time.")]
    UpstreamTimeout,

    #[error("APRS.fi API error: {}", status_text(.status, .reason.as_deref()))]
    UpstreamHttp {
        status: StatusCode,
        reason: Option<String>,
    },

    /// Upstream answered `result: "fail"`; the body is returned as-is.
    #[error("APRS.fi API reported failure")]
    UpstreamApplication(Value),

    /// Detail is logged, never sent to the client.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// `"<code> <reason>"`, or just the code when there is no reason phrase.
fn status_text(status: &StatusCode, reason: Option<&str>) -> String {
    match reason.map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

impl ProxyError {
    pub fn upstream_http(status: StatusCode, reason: Option<String>) -> Self {
        ProxyError::UpstreamHttp { status, reason }
    }

    /// Status code sent to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamHttp { status, .. } => *status,
            ProxyError::UpstreamApplication(_) => StatusCode::BAD_REQUEST,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed => "method_not_allowed",
            ProxyError::NotConfigured => "not_configured",
            ProxyError::InvalidParameter(_) => "invalid_parameter",
            ProxyError::UpstreamTimeout => "upstream_timeout",
            ProxyError::UpstreamHttp { .. } => "upstream_http_error",
            ProxyError::UpstreamApplication(_) => "upstream_application_error",
            ProxyError::Internal(_) => "internal",
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout(_) => ProxyError::UpstreamTimeout,
            other => ProxyError::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Internal(format!("upstream body is not JSON: {}", err))
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyError::UpstreamApplication(body) => json_response(status, body, None),
            ProxyError::Internal(_) => error_response(INTERNAL_ERROR_MESSAGE, status),
            other => error_response(&other.to_string(), status),
        }
    }
}
