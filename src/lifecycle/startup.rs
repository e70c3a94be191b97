//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Apply command-line and environment overrides
//!
//! # Design Decisions
//! - Fail fast: an unreadable or invalid config file is fatal
//! - A missing credential is not fatal; it is reported and proxying is refused

use std::path::Path;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ProxyConfig, API_KEY_ENV};

/// Build the effective configuration.
///
/// Precedence, lowest first: defaults, config file, `--bind`, environment.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
    }
    config.apply_env();

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Log the parts of the configuration an operator needs at startup.
pub fn log_config(config: &ProxyConfig) {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        timeout_ms = config.upstream.timeout_ms,
        cache_max_age_secs = config.cache.max_age_secs,
        "Configuration loaded"
    );

    if config.upstream.api_key().is_none() {
        tracing::warn!(
            env = API_KEY_ENV,
            "Upstream credential not configured; proxy requests will be refused"
        );
    }
}
