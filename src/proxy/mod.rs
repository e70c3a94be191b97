//! Upstream proxying.

pub mod pipeline;

pub use pipeline::forward;
