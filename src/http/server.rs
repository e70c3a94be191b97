//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing, panic catching)
//! - Dispatch requests by route kind (preflight, health, proxy)
//! - Translate every pipeline failure into a response
//! - Serve with graceful shutdown

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, INTERNAL_ERROR_MESSAGE};
use crate::http::response;
use crate::observability::metrics;
use crate::proxy;
use crate::routing::{classify, RouteKind};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .fallback(handle_request)
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The fully layered router, for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Span for one request. The query string is left out: it may hold a
/// client-supplied credential.
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Top-level handler: classify, dispatch, and render failures.
async fn handle_request(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();
    let route = classify(&method, uri.path(), uri.query());

    let response = match route {
        RouteKind::Preflight => response::preflight(),
        RouteKind::HealthCheck => response::health(),
        RouteKind::Proxy => match proxy::forward(&state, &method, uri.query()).await {
            Ok(response) => response,
            Err(err) => {
                log_failure(&err);
                err.into_response()
            }
        },
    };

    metrics::record_request(route.as_str(), response.status().as_u16(), start);
    response
}

fn log_failure(err: &ProxyError) {
    match err {
        ProxyError::Internal(detail) => {
            tracing::error!(kind = err.kind(), error = %detail, "Proxy request failed");
        }
        ProxyError::UpstreamTimeout | ProxyError::UpstreamHttp { .. } => {
            tracing::warn!(kind = err.kind(), error = %err, "Upstream request failed");
        }
        _ => {
            tracing::debug!(kind = err.kind(), error = %err, "Request rejected");
        }
    }
}

/// Last line of defence: a panicking handler still yields the 500 envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    response::error_response(INTERNAL_ERROR_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR)
}
