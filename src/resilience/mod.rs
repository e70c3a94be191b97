//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the exchange deadline)
//!     → On expiry: 504 Gateway Timeout
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a single failure surfaces directly to the caller

pub mod timeouts;

pub use timeouts::{with_deadline, Elapsed};
