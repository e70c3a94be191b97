//! Response construction.
//!
//! # Responsibilities
//! - Build the preflight, health and error responses
//! - Re-serialize upstream JSON bodies for the client
//! - Attach the cross-origin header set to everything
//!
//! # Design Decisions
//! - Every body is JSON with `Content-Type: application/json`
//! - Errors share one envelope: `{ "error": ..., "service": ... }`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::http::cors::apply_cors;
use crate::{SERVICE_NAME, SERVICE_VERSION};

/// Error envelope returned on every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub service: &'static str,
}

/// Health document.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn now() -> Self {
        Self {
            status: "healthy",
            service: SERVICE_NAME,
            version: SERVICE_VERSION,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn with_cors(mut response: Response) -> Response {
    apply_cors(response.headers_mut());
    response
}

/// 204 answer to a CORS preflight probe.
pub fn preflight() -> Response {
    with_cors(StatusCode::NO_CONTENT.into_response())
}

/// 200 health document.
pub fn health() -> Response {
    with_cors((StatusCode::OK, Json(HealthStatus::now())).into_response())
}

/// Error envelope with the given status.
pub fn error_response(message: &str, status: StatusCode) -> Response {
    let body = ErrorBody {
        error: message,
        service: SERVICE_NAME,
    };
    with_cors((status, Json(body)).into_response())
}

/// JSON body passed through from upstream, optionally with a cache policy.
pub fn json_response(status: StatusCode, body: Value, cache_control: Option<&str>) -> Response {
    let mut response = (status, Json(body)).into_response();
    if let Some(policy) = cache_control.and_then(|p| HeaderValue::from_str(p).ok()) {
        response.headers_mut().insert(header::CACHE_CONTROL, policy);
    }
    with_cors(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let response = health();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "aprsfi-proxy");
        assert_eq!(body["version"], "1.0.0");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = error_response("boom", StatusCode::BAD_GATEWAY);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "boom", "service": "aprsfi-proxy" }));
    }

    #[tokio::test]
    async fn test_json_passthrough_keeps_key_order() {
        let upstream: Value =
            serde_json::from_str(r#"{"result":"ok","found":1,"command":"get"}"#).unwrap();
        let response = json_response(StatusCode::OK, upstream, Some("public, max-age=30"));
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=30");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"result":"ok","found":1,"command":"get"}"#);
    }

    #[tokio::test]
    async fn test_json_without_cache_policy() {
        let response = json_response(StatusCode::BAD_REQUEST, Value::Null, None);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
