//! # Jitter for backoff delays.
//!
//! [`JitterPolicy`] adds randomness to delays so that many retry sequences
//! hitting the same dependency do not wake up in lockstep.
//!
//! - [`JitterPolicy::None`] no randomization, predictable delays
//! - [`JitterPolicy::Full`] random delay in `[0, delay]` (most aggressive)
//! - [`JitterPolicy::Equal`] `delay/2 + random[0, delay/2]` (balanced)
//! - [`JitterPolicy::Decorrelated`] `random[floor, delay × 3]`, capped
//!
//! [`Jittered`] applies a policy on top of any [`Backoff`].

use std::time::Duration;

use rand::Rng;

use super::Backoff;

/// Policy controlling randomization of retry delays.
///
/// ## Trade-offs
/// - **None**: Predictable, but risks thundering herd
/// - **Full**: Maximum randomness, aggressive load spreading
/// - **Equal**: Balanced (recommended for most use cases)
/// - **Decorrelated**: Spreads wider as delays grow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use the exact delay.
    #[default]
    None,

    /// Full jitter: random delay in `[0, delay]`.
    Full,

    /// Equal jitter: `delay/2 + random[0, delay/2]`.
    ///
    /// Preserves ~75% of the original delay on average.
    Equal,

    /// Decorrelated jitter: `random[floor, delay × 3]`, capped at a maximum.
    ///
    /// Needs a floor and a cap, see [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    ///
    /// ### Note
    /// For `Decorrelated` this returns the input unchanged; use
    /// [`apply_decorrelated`](Self::apply_decorrelated) which has the extra context.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => full_jitter(delay),
            JitterPolicy::Equal => equal_jitter(delay),
        }
    }

    /// Applies decorrelated jitter: a random value in `[floor, min(delay × 3, max)]`.
    ///
    /// If called on a non-`Decorrelated` policy, falls back to `apply(delay)`.
    pub fn apply_decorrelated(&self, floor: Duration, delay: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(delay);
        }

        let floor_ns = nanos(floor);
        let upper = nanos(delay).saturating_mul(3).min(nanos(max)).max(floor_ns);
        if floor_ns >= upper {
            return floor;
        }
        Duration::from_nanos(rand::rng().random_range(floor_ns..=upper))
    }
}

/// Any [`Backoff`] with a [`JitterPolicy`] applied to each delay.
///
/// For `Decorrelated`, the floor is the algorithm's delay at attempt `0`
/// (never above the current delay) and there is no cap.
#[derive(Clone, Copy, Debug)]
pub struct Jittered<B> {
    inner: B,
    jitter: JitterPolicy,
}

impl<B> Jittered<B> {
    /// Wraps `inner` with `jitter`.
    pub fn new(inner: B, jitter: JitterPolicy) -> Self {
        Self { inner, jitter }
    }

    /// Returns the wrapped algorithm.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: Backoff> Backoff for Jittered<B> {
    fn delay(&self, attempt: u32) -> Duration {
        let delay = self.inner.delay(attempt);
        match self.jitter {
            JitterPolicy::Decorrelated => {
                let floor = self.inner.delay(0).min(delay);
                self.jitter.apply_decorrelated(floor, delay, Duration::MAX)
            }
            _ => self.jitter.apply(delay),
        }
    }
}

/// Delay in nanoseconds, saturating at `u64::MAX` (~584 years).
fn nanos(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX)
}

/// Full jitter: random[0, delay]
fn full_jitter(delay: Duration) -> Duration {
    let ns = nanos(delay);
    if ns == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(rand::rng().random_range(0..=ns))
}

/// Equal jitter: delay/2 + random[0, delay/2]
fn equal_jitter(delay: Duration) -> Duration {
    let ns = nanos(delay);
    let half = ns / 2;
    if half == 0 {
        return Duration::from_nanos(ns);
    }
    Duration::from_nanos(half + rand::rng().random_range(0..=half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::{Linear, binary_exponential};

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(1234);
        assert_eq!(JitterPolicy::None.apply(d), d);
        assert_eq!(JitterPolicy::default(), JitterPolicy::None);
    }

    #[test]
    fn test_full_jitter_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            assert!(JitterPolicy::Full.apply(d) <= d);
        }
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            let j = JitterPolicy::Equal.apply(d);
            assert!(j >= Duration::from_millis(500), "{j:?} below half");
            assert!(j <= d, "{j:?} above delay");
        }
    }

    #[test]
    fn test_decorrelated_bounds() {
        let floor = Duration::from_millis(100);
        let delay = Duration::from_secs(1);
        let max = Duration::from_secs(2);
        for _ in 0..100 {
            let j = JitterPolicy::Decorrelated.apply_decorrelated(floor, delay, max);
            assert!(j >= floor && j <= max, "{j:?} out of range");
        }
    }

    #[test]
    fn test_decorrelated_floor_above_cap() {
        let floor = Duration::from_secs(5);
        let j = JitterPolicy::Decorrelated.apply_decorrelated(floor, Duration::from_secs(1), Duration::from_secs(2));
        assert_eq!(j, floor);
    }

    #[test]
    fn test_jittered_backoff_stays_below_base() {
        let algorithm = binary_exponential(Duration::from_millis(10)).with_jitter(JitterPolicy::Full);
        for attempt in 0..10 {
            let base = Duration::from_millis(10) * 2u32.pow(attempt);
            assert!(algorithm.delay(attempt) <= base, "attempt {attempt}");
        }
    }

    #[test]
    fn test_jittered_linear_zero_stays_zero() {
        let algorithm = Linear::new(Duration::from_millis(10)).with_jitter(JitterPolicy::Decorrelated);
        assert_eq!(algorithm.delay(0), Duration::ZERO);
    }
}
