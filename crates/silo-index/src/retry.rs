//! Bounded retry for upstream fetches.
//!
//! Only transient transport failures (refused connections, resets,
//! timeouts) are retried, with a short exponential backoff. Anything that
//! produced an HTTP status is returned on the first attempt untouched;
//! the resolver and cache interpret statuses themselves.

use std::time::Duration;

/// Retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles per attempt (200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Drive `f` until it yields a response or the attempt budget runs out.
pub(crate) async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < MAX_RETRIES => {
                let delay = Duration::from_millis(BASE_DELAY_MS << attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "transient fetch failure, backing off {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
