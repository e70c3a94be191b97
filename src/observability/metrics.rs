//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by route kind and status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `proxy_upstream_requests_total` (counter): upstream calls by outcome
//! - `proxy_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until a recorder is installed, so handlers and
//! tests never depend on `init_metrics` having run.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one client request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!("proxy_requests_total", "route" => route, "status" => status)
        .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream exchange.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    metrics::counter!("proxy_upstream_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("proxy_upstream_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
