//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a hard deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - The wrapped future is dropped on expiry, releasing its socket and timer

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// The deadline passed before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {}ms elapsed", .0.as_millis())]
pub struct Elapsed(pub Duration);

/// Run `fut` to completion or until `limit` has passed, whichever is first.
pub async fn with_deadline<F, T>(limit: Duration, fut: F) -> Result<T, Elapsed>
where
    F: Future<Output = T>,
{
    let deadline = Instant::now() + limit;
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| Elapsed(limit))
}
