use async_trait::async_trait;

use crate::breaker::Breaker;
use crate::strategy::Strategy;

/// Caps the total number of attempts.
///
/// `limit(n)` lets attempts `0..n` run: after the failed attempt with index
/// `attempt` it continues only if `attempt + 1 < n`. The first attempt always
/// runs, so `limit(0)` behaves like `limit(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    attempts: u32,
}

impl Limit {
    /// Maximum number of attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Creates a [`Limit`] of `attempts` total attempts.
pub fn limit(attempts: u32) -> Limit {
    Limit { attempts }
}

#[async_trait]
impl<E: Sync> Strategy<E> for Limit {
    async fn check(&mut self, attempt: u32, _err: &E, _breaker: &dyn Breaker) -> bool {
        attempt.saturating_add(1) < self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gate;

    #[tokio::test]
    async fn test_limit_boundaries() {
        let gate = Gate::new();
        let mut l = limit(3);

        assert!(l.check(0, &(), &gate).await);
        assert!(l.check(1, &(), &gate).await);
        assert!(!l.check(2, &(), &gate).await);
        assert!(!l.check(u32::MAX, &(), &gate).await);
        assert_eq!(l.attempts(), 3);
    }

    #[tokio::test]
    async fn test_limit_zero_and_one_stop_immediately() {
        let gate = Gate::new();
        assert!(!limit(0).check(0, &(), &gate).await);
        assert!(!limit(1).check(0, &(), &gate).await);
    }
}
