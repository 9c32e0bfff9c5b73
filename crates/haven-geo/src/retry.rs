//! Retry with exponential back-off and jitter for provider calls.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 5xx, 429). Non-transient errors are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::GeoSearchError;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 5xx and 429: transient server load or throttling.
///
/// **Not retriable (hard stop):**
/// - Other HTTP statuses (4xx): retrying won't change the answer.
/// - [`GeoSearchError::Deserialize`]: malformed response; retrying won't fix it.
/// - [`GeoSearchError::InvalidBaseUrl`]: configuration error.
pub(crate) fn is_retriable(err: &GeoSearchError) -> bool {
    match err {
        GeoSearchError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GeoSearchError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        GeoSearchError::Deserialize { .. } | GeoSearchError::InvalidBaseUrl(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// Sleeps `backoff_base_ms * 2^(attempt-1)` before each retry, with ±25%
/// jitter, capped at 30 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GeoSearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeoSearchError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient geo search error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn deserialize_err() -> GeoSearchError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        GeoSearchError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn too_many_requests_is_retriable() {
        assert!(is_retriable(&GeoSearchError::HttpStatus {
            status: 429,
            url: "https://example.com".to_owned(),
        }));
    }

    #[test]
    fn server_error_is_retriable() {
        assert!(is_retriable(&GeoSearchError::HttpStatus {
            status: 503,
            url: "https://example.com".to_owned(),
        }));
    }

    #[test]
    fn client_error_is_not_retriable() {
        assert!(!is_retriable(&GeoSearchError::HttpStatus {
            status: 403,
            url: "https://example.com".to_owned(),
        }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, GeoSearchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_throttled_calls_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(GeoSearchError::HttpStatus {
                        status: 429,
                        url: "https://example.com".to_owned(),
                    })
                } else {
                    Ok::<u32, GeoSearchError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_deserialize_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(deserialize_err())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(GeoSearchError::Deserialize { .. })));
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(GeoSearchError::HttpStatus {
                    status: 500,
                    url: "https://example.com".to_owned(),
                })
            }
        })
        .await;
        // max_retries=2 means 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(GeoSearchError::HttpStatus { .. })));
    }
}
