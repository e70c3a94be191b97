//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, panic catching)
//!     → routing (preflight / health / proxy)
//!     → proxy::pipeline (validate, forward, translate)
//!     → response.rs (JSON bodies, status codes)
//!     → cors.rs (cross-origin headers on every response)
//!     → Send to client
//! ```

pub mod cors;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, X_REQUEST_ID};
