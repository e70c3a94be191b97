//! Upstream API access.

pub mod client;

pub use client::{UpstreamClient, UpstreamError, UpstreamReply};
