//! Request classification.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query)
//!     → classify()
//!     → Preflight   → response::preflight()
//!     → HealthCheck → response::health()
//!     → Proxy       → proxy::pipeline
//! ```
//!
//! # Design Decisions
//! - Pure function of the request line; no headers are inspected
//! - Health is answered for any method, ahead of the GET-only check
//! - `/?` carries a (blank) query string and is proxied, not a health probe

use axum::http::Method;

/// Path answered with the health document.
pub const HEALTH_PATH: &str = "/health";

/// Where a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// CORS preflight probe.
    Preflight,
    /// Liveness document.
    HealthCheck,
    /// Forward to the upstream API.
    Proxy,
}

impl RouteKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Preflight => "preflight",
            RouteKind::HealthCheck => "health",
            RouteKind::Proxy => "proxy",
        }
    }
}

/// Classify a request by method, path and raw query string.
///
/// `query` is `None` when the request target has no `?` at all.
pub fn classify(method: &Method, path: &str, query: Option<&str>) -> RouteKind {
    if method == Method::OPTIONS {
        return RouteKind::Preflight;
    }

    if path == HEALTH_PATH || (path == "/" && query.is_none()) {
        return RouteKind::HealthCheck;
    }

    RouteKind::Proxy
}
