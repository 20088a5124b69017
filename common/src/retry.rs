//! Linear retry/backoff for outbound HTTP calls (spec.md §4.4 "Wallet call
//! retries"), generalized so both the Payments orchestrator's Wallet/Risk
//! calls and the Token Validator's JWKS fetch can share it.
//!
//! Grounded on `original_source/services/payments_service/app/routes/payment_intents.py`'s
//! `_post_wallet_with_retry`: fixed attempt budget, linear backoff between
//! attempts (never after the last one), and a retryable/fatal split so 4xx
//! responses fail fast instead of burning the whole budget.

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_seconds: u64,
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff_seconds: u64) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff_seconds,
        }
    }
}

/// Distinguishes a failure worth retrying (timeout, transport error, 5xx)
/// from one that should fail the whole operation immediately (4xx).
pub enum Retry<E> {
    Retryable(E),
    Fatal(E),
}

/// Runs `attempt` up to `policy.attempts` times, 1-indexed, sleeping
/// `backoff_seconds * attempt_index` between retryable failures. Returns the
/// last retryable error if the budget is exhausted, or propagates a fatal
/// error immediately.
pub async fn retry_linear<T, E, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, Retry<E>>>,
{
    let mut last_err = None;
    for attempt_index in 1..=policy.attempts {
        match attempt(attempt_index).await {
            Ok(value) => return Ok(value),
            Err(Retry::Fatal(err)) => return Err(err),
            Err(Retry::Retryable(err)) => {
                last_err = Some(err);
                if attempt_index < policy.attempts {
                    let backoff = policy.backoff_seconds * attempt_index as u64;
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                }
            }
        }
    }
    Err(last_err.expect("policy.attempts >= 1 guarantees at least one iteration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, 0);
        let result: Result<&str, &str> = retry_linear(policy, |_attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok("ok") }
        })
        .await;
        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_until_success_within_budget() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, 0);
        let result: Result<&str, &str> = retry_linear(policy, |_attempt| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 1 {
                    Err(Retry::Retryable("transient"))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;
        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fatal_error_short_circuits() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, 0);
        let result: Result<&str, &str> = retry_linear(policy, |_attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Retry::Fatal("bad request")) }
        })
        .await;
        assert_eq!(result, Err("bad request"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_budget_and_returns_last_error() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2, 0);
        let result: Result<&str, &str> = retry_linear(policy, |_attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Retry::Retryable("still down")) }
        })
        .await;
        assert_eq!(result, Err("still down"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
