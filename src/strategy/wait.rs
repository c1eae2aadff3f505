//! # Waiting strategies.
//!
//! Each strategy here sleeps before permitting the next attempt and always
//! answers `true` unless the breaker closes during (or exactly at the end of)
//! the wait. The sleep goes through [`Breaker::wait`], which gives closing
//! priority over an elapsed timer.
//!
//! ```text
//! attempt n fails ──► check(n) ──► wait(d) ──┬─► elapsed, gate open ──► true  (attempt n+1)
//!                                            └─► gate closed        ──► false (Interrupted)
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::backoff::{Backoff, JitterPolicy, Jittered};
use crate::breaker::Breaker;
use crate::strategy::Strategy;

/// Waits a fixed duration before every retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delay {
    delay: Duration,
}

/// Creates a [`Delay`].
pub fn delay(delay: Duration) -> Delay {
    Delay { delay }
}

#[async_trait]
impl<E: Sync> Strategy<E> for Delay {
    async fn check(&mut self, _attempt: u32, _err: &E, breaker: &dyn Breaker) -> bool {
        breaker.wait(self.delay).await
    }
}

/// Waits `delays[attempt]` before the retry; the last entry repeats.
///
/// An empty list never waits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wait {
    delays: Vec<Duration>,
}

impl Wait {
    fn delay_for(&self, attempt: u32) -> Duration {
        let idx = usize::try_from(attempt).unwrap_or(usize::MAX);
        self.delays
            .get(idx)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or_default()
    }
}

/// Creates a [`Wait`] from a list of per-attempt delays.
pub fn wait(delays: impl IntoIterator<Item = Duration>) -> Wait {
    Wait {
        delays: delays.into_iter().collect(),
    }
}

#[async_trait]
impl<E: Sync> Strategy<E> for Wait {
    async fn check(&mut self, attempt: u32, _err: &E, breaker: &dyn Breaker) -> bool {
        breaker.wait(self.delay_for(attempt)).await
    }
}

/// Waits `algorithm.delay(n)` before attempt `n`, i.e. `attempt + 1` for the
/// attempt that just failed.
#[derive(Clone, Copy, Debug)]
pub struct WaitBackoff<B> {
    algorithm: B,
}

/// Creates a [`WaitBackoff`] driven by `algorithm`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::backoff::binary_exponential;
/// use retryvisor::strategy::backoff;
///
/// // waits 20ms, 40ms, 80ms, ... before attempts 1, 2, 3, ...
/// let _strategy = backoff(binary_exponential(Duration::from_millis(10)));
/// ```
pub fn backoff<B: Backoff>(algorithm: B) -> WaitBackoff<B> {
    WaitBackoff { algorithm }
}

/// Like [`backoff`], with `jitter` applied to every delay.
pub fn backoff_with_jitter<B: Backoff>(algorithm: B, jitter: JitterPolicy) -> WaitBackoff<Jittered<B>> {
    backoff(algorithm.with_jitter(jitter))
}

#[async_trait]
impl<E: Sync, B: Backoff> Strategy<E> for WaitBackoff<B> {
    async fn check(&mut self, attempt: u32, _err: &E, breaker: &dyn Breaker) -> bool {
        breaker.wait(self.algorithm.delay(attempt.saturating_add(1))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::{Fibonacci, Linear};
    use crate::{Gate, strategy::BoxStrategy};
    use tokio::time::{self, Instant};

    fn assert_waited(started: Instant, expected: Duration) {
        let waited = started.elapsed();
        assert!(
            waited >= expected && waited < expected + Duration::from_millis(5),
            "waited {waited:?}, expected {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_sleeps_full_duration() {
        let gate = Gate::new();
        let started = Instant::now();

        assert!(delay(Duration::from_millis(250)).check(0, &(), &gate).await);
        assert_waited(started, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_interrupted_by_close() {
        let gate = Gate::new();
        let handle = gate.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            handle.close();
        });

        let started = Instant::now();
        assert!(!delay(Duration::from_secs(3600)).check(0, &(), &gate).await);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_list_repeats_last() {
        let gate = Gate::new();
        let mut w = wait([Duration::from_millis(10), Duration::from_millis(30)]);

        for (attempt, expected) in [(0, 10), (1, 30), (2, 30), (u32::MAX, 30)] {
            let started = Instant::now();
            assert!(w.check(attempt, &(), &gate).await);
            assert_waited(started, Duration::from_millis(expected));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_wait_list_never_sleeps() {
        let gate = Gate::new();
        let started = Instant::now();
        assert!(wait([]).check(5, &(), &gate).await);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_uses_next_attempt_index() {
        let gate = Gate::new();
        let mut s: BoxStrategy<()> = Box::new(backoff(Linear::new(Duration::from_millis(100))));

        let started = Instant::now();
        assert!(s.check(3, &(), &gate).await);
        assert_waited(started, Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_retry_waits_one_step() {
        let gate = Gate::new();
        let mut linear = backoff(Linear::new(Duration::from_millis(100)));
        let mut fibonacci = backoff(Fibonacci::new(Duration::from_millis(100)));

        let started = Instant::now();
        assert!(linear.check(0, &(), &gate).await);
        assert_waited(started, Duration::from_millis(100));

        let started = Instant::now();
        assert!(fibonacci.check(0, &(), &gate).await);
        assert_waited(started, Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_saturates_at_last_index() {
        let gate = Gate::new();
        let mut s = backoff(|attempt: u32| Duration::from_millis(u64::from(attempt == u32::MAX)));

        let started = Instant::now();
        assert!(s.check(u32::MAX, &(), &gate).await);
        assert_waited(started, Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_with_jitter_never_exceeds_base() {
        let gate = Gate::new();
        let mut s = backoff_with_jitter(Linear::new(Duration::from_millis(100)), JitterPolicy::Full);

        let started = Instant::now();
        assert!(s.check(2, &(), &gate).await);
        assert!(started.elapsed() < Duration::from_millis(205));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_gate_fails_without_sleeping() {
        let gate = Gate::pre_closed();
        let started = Instant::now();
        assert!(!delay(Duration::from_secs(1)).check(0, &(), &gate).await);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
