//! Wait Mechanisms
//!
//! Poll a predicate until it yields a value or a deadline passes. This is a
//! plain busy-wait with a fixed delay, independent of the replay engine.
//!
//! Errors raised by the predicate are returned as-is on the first
//! occurrence; the loop is not a failure-suppressing retry.

use std::time::{Duration, Instant};

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Run [`wait_for`] with these options
    pub fn wait_for<T, E, F>(&self, predicate: F) -> Result<Option<T>, E>
    where
        F: FnMut() -> Result<Option<T>, E>,
    {
        wait_for(predicate, self.poll_interval(), self.timeout())
    }
}

/// Call `predicate` until it returns `Some`, sleeping `poll_delay` between
/// attempts.
///
/// The predicate runs at least once. Returns `Ok(None)` once
/// `retry_timeout` has elapsed without a value. A timeout too large to
/// represent as an instant (e.g. `Duration::MAX`) never expires.
pub fn wait_for<T, E, F>(
    mut predicate: F,
    poll_delay: Duration,
    retry_timeout: Duration,
) -> Result<Option<T>, E>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    let deadline = Instant::now().checked_add(retry_timeout);
    loop {
        if let Some(value) = predicate()? {
            return Ok(Some(value));
        }
        std::thread::sleep(poll_delay);
        if deadline.is_some_and(|deadline| Instant::now() > deadline) {
            return Ok(None);
        }
    }
}

/// Boolean form of [`wait_for`]; `true` if the condition held in time
pub fn wait_until<F>(mut condition: F, poll_delay: Duration, retry_timeout: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let found: Result<Option<()>, std::convert::Infallible> =
        wait_for(|| Ok(condition().then_some(())), poll_delay, retry_timeout);
    matches!(found, Ok(Some(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Duration = Duration::from_millis(1);

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_builder() {
            let opts = WaitOptions::new().with_timeout(5000).with_poll_interval(100);
            assert_eq!(opts.timeout(), Duration::from_secs(5));
            assert_eq!(opts.poll_interval(), Duration::from_millis(100));
        }

        #[test]
        fn test_options_wait_for() {
            let opts = WaitOptions::new().with_timeout(50).with_poll_interval(1);
            let got: Result<Option<u8>, ()> = opts.wait_for(|| Ok(Some(7)));
            assert_eq!(got, Ok(Some(7)));
        }
    }

    mod wait_for_tests {
        use super::*;

        #[test]
        fn test_immediate_success_calls_once() {
            let mut calls = 0;
            let got: Result<Option<&str>, ()> = wait_for(
                || {
                    calls += 1;
                    Ok(Some("ready"))
                },
                Duration::from_secs(10),
                Duration::from_secs(10),
            );
            assert_eq!(got, Ok(Some("ready")));
            assert_eq!(calls, 1);
        }

        #[test]
        fn test_succeeds_after_retries() {
            let mut calls = 0;
            let got: Result<Option<u32>, ()> = wait_for(
                || {
                    calls += 1;
                    Ok((calls >= 3).then_some(calls))
                },
                FAST,
                Duration::from_secs(5),
            );
            assert_eq!(got, Ok(Some(3)));
        }

        #[test]
        fn test_times_out_with_none() {
            let start = Instant::now();
            let got: Result<Option<()>, ()> =
                wait_for(|| Ok(None), FAST, Duration::from_millis(30));
            assert_eq!(got, Ok(None));
            assert!(start.elapsed() >= Duration::from_millis(30));
        }

        #[test]
        fn test_zero_timeout_still_tries_once() {
            let mut calls = 0;
            let got: Result<Option<()>, ()> = wait_for(
                || {
                    calls += 1;
                    Ok(None)
                },
                FAST,
                Duration::ZERO,
            );
            assert_eq!(got, Ok(None));
            assert_eq!(calls, 1);
        }

        #[test]
        fn test_unbounded_timeout_does_not_overflow() {
            let got: Result<Option<u8>, ()> = wait_for(|| Ok(Some(1)), FAST, Duration::MAX);
            assert_eq!(got, Ok(Some(1)));
        }

        #[test]
        fn test_unbounded_timeout_keeps_polling() {
            let mut calls = 0;
            let got: Result<Option<u32>, ()> = wait_for(
                || {
                    calls += 1;
                    Ok((calls >= 3).then_some(calls))
                },
                FAST,
                Duration::MAX,
            );
            assert_eq!(got, Ok(Some(3)));
        }

        #[test]
        fn test_predicate_error_propagates_immediately() {
            let mut calls = 0;
            let got: Result<Option<()>, String> = wait_for(
                || {
                    calls += 1;
                    Err("stale element".to_string())
                },
                FAST,
                Duration::from_secs(5),
            );
            assert_eq!(got, Err("stale element".to_string()));
            assert_eq!(calls, 1);
        }
    }

    mod wait_until_tests {
        use super::*;

        #[test]
        fn test_wait_until_true() {
            let mut n = 0;
            assert!(wait_until(
                || {
                    n += 1;
                    n > 2
                },
                FAST,
                Duration::from_secs(5)
            ));
        }

        #[test]
        fn test_wait_until_max_options() {
            let opts = WaitOptions::new()
                .with_timeout(u64::MAX)
                .with_poll_interval(1);
            let got: Result<Option<()>, ()> = opts.wait_for(|| Ok(Some(())));
            assert_eq!(got, Ok(Some(())));
            assert!(wait_until(|| true, FAST, Duration::MAX));
        }

        #[test]
        fn test_wait_until_timeout() {
            assert!(!wait_until(|| false, FAST, Duration::from_millis(10)));
        }
    }
}
