//! Cooperative cancellation.
//!
//! A thin re-export of [`tokio_util::sync::CancellationToken`]: every
//! long-running traversal in this crate (resolution expansion, backward
//! chaining, clause store scans) takes one of these and checks
//! [`CancellationToken::is_cancelled`] between work units instead of rolling
//! its own atomic flag.

pub use tokio_util::sync::CancellationToken;

use crate::error::FolError;

/// Checks `token` and turns a cancellation into a [`FolError::Cancelled`].
/// Called between iterations of every unbounded loop in this crate.
pub fn check(token: &CancellationToken) -> Result<(), FolError> {
    if token.is_cancelled() {
        Err(FolError::Cancelled)
    } else {
        Ok(())
    }
}
