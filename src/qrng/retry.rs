//! Bounded retry around a QRNG backend
//!
//! `fetch` never retries on its own. Orchestration decides whether to wrap the
//! configured backend in a `RetryingBackend`, which retries provider failures
//! of a single batch with exponential backoff.

use crate::error::{Error, Result};
use crate::qrng::QrngBackend;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// How many times to retry a failed batch and how long to wait between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 disables retrying)
    pub max_retries: u32,
    /// Delay before the first retry; doubled after every further failure
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Backend wrapper that retries `Error::Provider` failures
pub struct RetryingBackend<'a> {
    inner: &'a dyn QrngBackend,
    policy: RetryPolicy,
}

impl<'a> RetryingBackend<'a> {
    pub fn new(inner: &'a dyn QrngBackend, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl QrngBackend for RetryingBackend<'_> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn batch(&self, len: usize) -> Result<Vec<u16>> {
        let mut attempt = 0;
        loop {
            match self.inner.batch(len) {
                Err(Error::Provider(msg)) if attempt < self.policy.max_retries => {
                    attempt += 1;
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        "{} batch failed ({}), retry {}/{} in {:?}",
                        self.inner.name(),
                        msg,
                        attempt,
                        self.policy.max_retries,
                        delay
                    );
                    thread::sleep(delay);
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then succeeds
    struct FlakyBackend {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyBackend {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl QrngBackend for FlakyBackend {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn description(&self) -> &'static str {
            "Fails a fixed number of times"
        }

        fn batch(&self, len: usize) -> Result<Vec<u16>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(Error::Provider("temporarily unavailable".to_string()))
            } else {
                Ok(vec![1; len])
            }
        }
    }

    fn quick(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn test_recovers_within_budget() {
        let flaky = FlakyBackend::new(2);
        let backend = RetryingBackend::new(&flaky, quick(2));

        assert_eq!(backend.batch(4).unwrap(), vec![1; 4]);
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_gives_up_after_budget() {
        let flaky = FlakyBackend::new(5);
        let backend = RetryingBackend::new(&flaky, quick(2));

        assert!(matches!(backend.batch(4), Err(Error::Provider(_))));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_no_retry_policy_calls_once() {
        let flaky = FlakyBackend::new(1);
        let backend = RetryingBackend::new(&flaky, RetryPolicy::none());

        assert!(backend.batch(4).is_err());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_keeps_inner_name() {
        let flaky = FlakyBackend::new(0);
        let backend = RetryingBackend::new(&flaky, quick(1));
        assert_eq!(backend.name(), "flaky");
    }
}
