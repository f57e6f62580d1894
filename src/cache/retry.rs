//! Retry policy for remote calls.
//!
//! Transient failures (network errors, error status codes) are retried up
//! to three attempts with exponential backoff. Unauthorized failures are
//! never retried: the token will not get better on its own, and the global
//! session-invalidation path must run instead.

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::error::ApiResult;

/// Total attempts, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;

const BASE_DELAY: Duration = Duration::from_millis(300);

/// Runs `op`, retrying transient failures.
pub async fn with_retries<T, F, Fut>(mut op: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                let delay = BASE_DELAY * 2u32.pow(attempt - 1);
                warn!("Attempt {attempt}/{MAX_ATTEMPTS} failed ({e}), retrying in {delay:?}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
