//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "APRS_API_KEY";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API settings, including the credential.
    pub upstream: UpstreamConfig,

    /// Cache policy advertised to clients.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Overlay the credential from the process environment.
    ///
    /// An empty variable leaves the credential unset.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.upstream.set_api_key(key);
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full endpoint URL, query string excluded.
    pub base_url: String,

    /// Hard deadline for one upstream exchange in milliseconds.
    pub timeout_ms: u64,

    /// User-Agent sent on every upstream call.
    pub user_agent: String,

    /// Honor HTTP(S)_PROXY environment variables for upstream calls.
    pub system_proxy: bool,

    /// Server-held credential injected as `apikey`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl UpstreamConfig {
    /// The credential, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.aprs.fi/api/get".to_string(),
            timeout_ms: 10_000,
            user_agent: format!(
                "{}/{} (Rust reverse proxy)",
                crate::SERVICE_NAME,
                crate::SERVICE_VERSION
            ),
            system_proxy: true,
            api_key: None,
        }
    }
}

// Hand-written so the credential never lands in logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("system_proxy", &self.system_proxy)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .finish()
    }
}

/// Cache policy advertised on successful responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `max-age` directive in seconds.
    pub max_age_secs: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_age_secs: 30 }
    }
}

impl CacheConfig {
    /// Value for the `Cache-Control` header.
    pub fn header_value(&self) -> String {
        format!("public, max-age={}", self.max_age_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
