//! Deadline-bound upstream calls

use std::future::Future;
use std::time::Duration;

use super::UpstreamError;

/// Runs `call` with a hard deadline.
///
/// When the deadline passes, the future is dropped. For a `reqwest` call
/// that aborts the request and releases its connection, so nothing keeps
/// running after a timeout has been reported.
pub async fn with_deadline<F, T>(deadline: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout),
    }
}
