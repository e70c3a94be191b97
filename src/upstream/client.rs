//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Build the outbound URL from the fixed endpoint and sanitized query
//! - Issue exactly one GET per call with the identifying User-Agent
//! - Bound the whole exchange (headers and body) by the configured deadline

use axum::body::Bytes;
use axum::http::StatusCode;
use hyper::ext::ReasonPhrase;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::params::QueryParams;
use crate::resilience::with_deadline;

/// Errors raised while talking to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The deadline passed before the exchange finished.
    #[error("upstream did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, DNS or protocol failure.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream URL '{0}': {1}")]
    Url(String, url::ParseError),
}

/// Status and raw body of one upstream exchange.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    /// Reason phrase as sent, falling back to the canonical one.
    pub reason: Option<String>,
    pub body: Bytes,
}

/// Reason phrase from the status line. hyper only records it when it
/// differs from the canonical phrase for the code.
fn reason_phrase(response: &reqwest::Response) -> Option<String> {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::to_string)
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .filter(|phrase| !phrase.is_empty())
}

/// Client for the upstream REST API.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::Url(config.base_url.clone(), e))?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Outbound URL for the given parameters.
    pub fn url_for(&self, params: &QueryParams) -> Url {
        let mut url = self.base_url.clone();
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&params.to_query_string()));
        }
        url
    }

    /// Perform one GET and read the full body, under a single deadline.
    pub async fn fetch(&self, params: &QueryParams) -> Result<UpstreamReply, UpstreamError> {
        let url = self.url_for(params);
        let start = Instant::now();

        let exchange = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let reason = reason_phrase(&response);
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamReply {
                status,
                reason,
                body,
            })
        };

        let result = match with_deadline(self.timeout, exchange).await {
            Ok(Ok(reply)) => Ok(reply),
            // The URL carries the credential; keep it out of error messages.
            Ok(Err(e)) => Err(UpstreamError::Transport(e.without_url())),
            Err(elapsed) => Err(UpstreamError::Timeout(elapsed.0)),
        };

        let outcome = match &result {
            Ok(reply) if reply.status.is_success() => "ok",
            Ok(_) => "http_error",
            Err(UpstreamError::Timeout(_)) => "timeout",
            Err(_) => "transport_error",
        };
        metrics::record_upstream(outcome, start);

        result
    }
}
