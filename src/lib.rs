//! APRS.fi API proxy library.
//!
//! Forwards `GET` queries to the APRS.fi REST API with a server-held
//! credential, validates the query first, and answers with cross-origin
//! and caching headers.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod params;
pub mod proxy;
pub mod resilience;
pub mod routing;
pub mod upstream;

/// Service name reported in health and error bodies.
pub const SERVICE_NAME: &str = "aprsfi-proxy";

/// Service version reported by the health endpoint.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
