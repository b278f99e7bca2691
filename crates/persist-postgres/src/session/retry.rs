//! Transient-failure retry for driver calls
//!
//! Mirrors what the driver classifies as transient: broken connections,
//! pool exhaustion, serialization failures, deadlocks, resource pressure and
//! server restarts. Everything else fails on the first attempt.

use std::future::Future;

use persist_core::RetryPolicy;
use sqlx::Error as SqlxError;
use tracing::{debug, warn};

/// SQLSTATE codes worth another attempt
pub fn is_transient_sqlstate(code: &str) -> bool {
    // 08: connection exception, 53: insufficient resources
    code.starts_with("08")
        || code.starts_with("53")
        || matches!(
            code,
            "40001" | "40P01" | "55006" | "55P03" | "57P01" | "57P02" | "57P03" | "58000" | "58030"
        )
}

/// Whether the driver error is transient
pub fn is_transient(error: &SqlxError) -> bool {
    match error {
        SqlxError::Io(_) | SqlxError::PoolTimedOut => true,
        SqlxError::Database(db_err) => db_err.code().is_some_and(|code| is_transient_sqlstate(&code)),
        _ => false,
    }
}

/// Decide whether to retry after `error`
///
/// Sleeps the backoff and returns the new retry count, or hands the error
/// back when it is permanent or the policy is exhausted.
pub(crate) async fn next_retry(
    policy: RetryPolicy,
    retries: u32,
    operation: &str,
    error: SqlxError,
) -> Result<u32, SqlxError> {
    if !is_transient(&error) {
        return Err(error);
    }

    if !policy.should_retry(retries) {
        warn!(
            operation = operation,
            attempts = retries + 1,
            error = %error,
            "Transient database failure, retries exhausted"
        );
        return Err(error);
    }

    let retry = retries + 1;
    let delay = policy.delay_for_attempt(retry);
    warn!(
        operation = operation,
        retry = retry,
        max_retries = policy.max_retry_count,
        delay_ms = delay.as_millis() as u64,
        error = %error,
        "Transient database failure, will retry"
    );
    tokio::time::sleep(delay).await;
    Ok(retry)
}

/// Run `op` until it succeeds, fails permanently or the policy is exhausted
pub(crate) async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, SqlxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SqlxError>>,
{
    let mut retries = 0;
    loop {
        match op().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(operation = operation, retries = retries, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => retries = next_retry(policy, retries, operation, error).await?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[test]
    fn test_transient_sqlstates() {
        assert!(is_transient_sqlstate("08006"));
        assert!(is_transient_sqlstate("53300"));
        assert!(is_transient_sqlstate("40001"));
        assert!(is_transient_sqlstate("40P01"));
        assert!(is_transient_sqlstate("57P01"));
        assert!(!is_transient_sqlstate("42P01"));
        assert!(!is_transient_sqlstate("23505"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(is_transient(&SqlxError::PoolTimedOut));
        assert!(is_transient(&SqlxError::Io(std::io::Error::from(
            std::io::ErrorKind::ConnectionReset
        ))));
        assert!(!is_transient(&SqlxError::PoolClosed));
        assert!(!is_transient(&SqlxError::RowNotFound));
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(RetryPolicy::new(5, Duration::ZERO), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SqlxError::RowNotFound) }
        })
        .await;

        assert!(matches!(result, Err(SqlxError::RowNotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_error_is_retried_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(RetryPolicy::new(5, Duration::ZERO), "test", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(SqlxError::PoolTimedOut)
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(RetryPolicy::new(2, Duration::ZERO), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SqlxError::PoolTimedOut) }
        })
        .await;

        assert!(matches!(result, Err(SqlxError::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
