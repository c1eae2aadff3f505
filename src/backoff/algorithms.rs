//! # Closed-form backoff algorithms.
//!
//! All arithmetic is done on nanoseconds in `u128` with saturating or checked
//! operations, so large attempt numbers degrade to [`Duration::MAX`] instead
//! of panicking.

use std::time::Duration;

use super::{Backoff, saturating_from_nanos};

/// `base + step × attempt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Incremental {
    /// Delay for attempt `0`.
    pub base: Duration,
    /// Added once per attempt.
    pub step: Duration,
}

impl Incremental {
    /// Creates an incremental backoff.
    pub fn new(base: Duration, step: Duration) -> Self {
        Self { base, step }
    }
}

impl Backoff for Incremental {
    fn delay(&self, attempt: u32) -> Duration {
        let grown = self.step.as_nanos().saturating_mul(u128::from(attempt));
        saturating_from_nanos(self.base.as_nanos().saturating_add(grown))
    }
}

/// `unit × attempt`; zero at attempt `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Linear {
    /// Delay added per attempt.
    pub unit: Duration,
}

impl Linear {
    /// Creates a linear backoff.
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }
}

impl Backoff for Linear {
    fn delay(&self, attempt: u32) -> Duration {
        saturating_from_nanos(self.unit.as_nanos().saturating_mul(u128::from(attempt)))
    }
}

/// `base × factor^attempt`, computed exactly with integer arithmetic.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::backoff::{Backoff, Exponential};
///
/// let exp = Exponential::new(Duration::from_secs(1), 3);
/// assert_eq!(exp.delay(0), Duration::from_secs(1));
/// assert_eq!(exp.delay(4), Duration::from_secs(81));
/// assert_eq!(exp.delay(u32::MAX), Duration::MAX);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exponential {
    /// Delay for attempt `0`.
    pub base: Duration,
    /// Multiplier applied per attempt.
    pub factor: u32,
}

impl Exponential {
    /// Creates an exponential backoff.
    pub fn new(base: Duration, factor: u32) -> Self {
        Self { base, factor }
    }
}

impl Backoff for Exponential {
    fn delay(&self, attempt: u32) -> Duration {
        let base = self.base.as_nanos();
        if base == 0 {
            return Duration::ZERO;
        }
        match u128::from(self.factor).checked_pow(attempt) {
            Some(scale) => saturating_from_nanos(base.saturating_mul(scale)),
            None => Duration::MAX,
        }
    }
}

/// [`Exponential`] with `factor = 2`.
pub fn binary_exponential(base: Duration) -> Exponential {
    Exponential::new(base, 2)
}

/// `unit × F(attempt)` where `F(0) = 0`, `F(1) = 1`, `F(n) = F(n-1) + F(n-2)`.
///
/// Computed iteratively in constant space. The iteration stops as soon as the
/// sequence saturates `u128`, so even `u32::MAX` costs fewer than 200 steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fibonacci {
    /// Multiplier for the sequence value.
    pub unit: Duration,
}

impl Fibonacci {
    /// Creates a fibonacci backoff.
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    fn number(n: u32) -> u128 {
        let (mut current, mut next) = (0u128, 1u128);
        for _ in 0..n {
            let sum = current.saturating_add(next);
            current = next;
            next = sum;
            if current == u128::MAX {
                break;
            }
        }
        current
    }
}

impl Backoff for Fibonacci {
    fn delay(&self, attempt: u32) -> Duration {
        saturating_from_nanos(self.unit.as_nanos().saturating_mul(Self::number(attempt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental() {
        let base = Duration::from_millis(1);
        let step = Duration::from_nanos(1);
        let algorithm = Incremental::new(base, step);

        for i in 0..10u32 {
            assert_eq!(algorithm.delay(i), base + step * i, "attempt {i}");
        }
    }

    #[test]
    fn test_linear() {
        let unit = Duration::from_millis(1);
        let algorithm = Linear::new(unit);

        assert_eq!(algorithm.delay(0), Duration::ZERO);
        for i in 0..10u32 {
            assert_eq!(algorithm.delay(i), unit * i, "attempt {i}");
        }
    }

    #[test]
    fn test_exponential() {
        let base = Duration::from_secs(1);
        let algorithm = Exponential::new(base, 3);

        for i in 0..10u32 {
            assert_eq!(algorithm.delay(i), base * 3u32.pow(i), "attempt {i}");
        }
    }

    #[test]
    fn test_binary_exponential() {
        let base = Duration::from_secs(1);
        let algorithm = binary_exponential(base);

        for i in 0..10u32 {
            assert_eq!(algorithm.delay(i), base * 2u32.pow(i), "attempt {i}");
        }
    }

    #[test]
    fn test_fibonacci_sequence() {
        let unit = Duration::from_millis(1);
        let sequence = [0u32, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];
        let algorithm = Fibonacci::new(unit);

        for (i, expected) in sequence.iter().enumerate() {
            assert_eq!(algorithm.delay(i as u32), unit * *expected, "attempt {i}");
        }
    }

    #[test]
    fn test_fibonacci_fifty() {
        let algorithm = Fibonacci::new(Duration::from_nanos(1));
        assert_eq!(algorithm.delay(50), Duration::from_nanos(12_586_269_025));
    }

    #[test]
    fn test_attempt_zero_is_base_case() {
        let base = Duration::from_millis(7);
        assert_eq!(Incremental::new(base, base).delay(0), base);
        assert_eq!(Linear::new(base).delay(0), Duration::ZERO);
        assert_eq!(Exponential::new(base, 5).delay(0), base);
        assert_eq!(binary_exponential(base).delay(0), base);
        assert_eq!(Fibonacci::new(base).delay(0), Duration::ZERO);
    }

    #[test]
    fn test_huge_attempts_saturate() {
        let unit = Duration::from_secs(1);
        assert_eq!(Incremental::new(unit, Duration::MAX).delay(u32::MAX), Duration::MAX);
        assert_eq!(Linear::new(Duration::MAX).delay(u32::MAX), Duration::MAX);
        assert_eq!(binary_exponential(unit).delay(u32::MAX), Duration::MAX);
        assert_eq!(Fibonacci::new(unit).delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn test_zero_base_never_grows() {
        assert_eq!(Exponential::new(Duration::ZERO, 10).delay(u32::MAX), Duration::ZERO);
        assert_eq!(Fibonacci::new(Duration::ZERO).delay(1000), Duration::ZERO);
    }
}
