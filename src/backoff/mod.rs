//! Backoff algorithms: pure `attempt → delay` functions.
//!
//! This module groups the knobs that control **how long** to wait between
//! attempts. A [`Backoff`] never sleeps by itself; the waiting strategies in
//! [`crate::strategy`] consult it and race the wait against the breaker.
//!
//! ## Contents
//! - [`Incremental`] `base + step × attempt`
//! - [`Linear`] `unit × attempt`
//! - [`Exponential`] `base × factor^attempt` (and [`binary_exponential`])
//! - [`Fibonacci`] `unit × F(attempt)`
//! - [`BackoffPolicy`] `first × factor^attempt` clamped to `max`, plus jitter
//! - [`JitterPolicy`] / [`Jittered`] randomization on top of any algorithm
//!
//! ## Rules
//! - Every algorithm is total: no panic and no overflow for any `u32`;
//!   results saturate at [`Duration::MAX`].
//! - `attempt = 0` yields the base case exactly (`0` for linear/fibonacci,
//!   `base` for incremental/exponential).
//! - Any `Fn(u32) -> Duration` closure is an algorithm too.

use std::time::Duration;

mod algorithms;
mod jitter;
mod policy;

pub use algorithms::{Exponential, Fibonacci, Incremental, Linear, binary_exponential};
pub use jitter::{JitterPolicy, Jittered};
pub use policy::BackoffPolicy;

/// A pure function from the 0-based attempt index to a wait duration.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::backoff::{Backoff, Linear};
///
/// let linear = Linear::new(Duration::from_millis(10));
/// assert_eq!(linear.delay(0), Duration::ZERO);
/// assert_eq!(linear.delay(3), Duration::from_millis(30));
///
/// let constant = |_attempt: u32| Duration::from_millis(5);
/// assert_eq!(constant.delay(7), Duration::from_millis(5));
/// ```
pub trait Backoff: Send + Sync {
    /// Returns the delay associated with `attempt`.
    fn delay(&self, attempt: u32) -> Duration;

    /// Wraps the algorithm so every delay is randomized with `jitter`.
    fn with_jitter(self, jitter: JitterPolicy) -> Jittered<Self>
    where
        Self: Sized,
    {
        Jittered::new(self, jitter)
    }
}

impl<F> Backoff for F
where
    F: Fn(u32) -> Duration + Send + Sync,
{
    fn delay(&self, attempt: u32) -> Duration {
        self(attempt)
    }
}

/// Converts a nanosecond count into a [`Duration`], saturating at [`Duration::MAX`].
pub(crate) fn saturating_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let secs = nanos / NANOS_PER_SEC;
    if secs > u128::from(u64::MAX) {
        return Duration::MAX;
    }
    Duration::new(secs as u64, (nanos % NANOS_PER_SEC) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_from_nanos() {
        assert_eq!(saturating_from_nanos(0), Duration::ZERO);
        assert_eq!(saturating_from_nanos(1_500_000_000), Duration::from_millis(1500));
        assert_eq!(saturating_from_nanos(u128::MAX), Duration::MAX);
        assert_eq!(saturating_from_nanos(Duration::MAX.as_nanos()), Duration::MAX);
    }

    #[test]
    fn test_closure_is_backoff() {
        let doubled = |attempt: u32| Duration::from_secs(u64::from(attempt) * 2);
        assert_eq!(doubled.delay(4), Duration::from_secs(8));
    }
}
