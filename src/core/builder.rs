use std::sync::Arc;

use crate::{
    core::Config,
    backoff::Backoff,
    strategy::{BoxStrategy, Strategy, backoff, limit},
    subscribers::{Subscribe, SubscriberSet},
};

/// One retry invocation: strategies, subscribers and an optional operation name.
///
/// A `Retrier` is consumed by [`run`](Retrier::run) /
/// [`run_with_token`](Retrier::run_with_token); its strategies therefore
/// belong to exactly one invocation.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use retryvisor::{Gate, Retrier};
/// use retryvisor::strategy::{delay, limit};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let res = Retrier::new()
///     .with_operation("fetch")
///     .with_strategy(limit(3))
///     .with_strategy(delay(Duration::from_millis(1)))
///     .run(&Gate::new(), |attempt| async move {
///         if attempt < 2 { Err("not yet") } else { Ok(attempt) }
///     })
///     .await;
///
/// assert_eq!(res.unwrap(), 2);
/// # }
/// ```
pub struct Retrier<E: Sync> {
    pub(crate) strategies: Vec<BoxStrategy<E>>,
    pub(crate) subscribers: SubscriberSet,
    pub(crate) operation: Option<Arc<str>>,
}

impl<E: Sync> Retrier<E> {
    /// Creates a retrier with no strategies: exactly one attempt.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            subscribers: SubscriberSet::default(),
            operation: None,
        }
    }

    /// Builds `[limit(attempts)?, backoff(policy)]` from a [`Config`].
    ///
    /// The policy's `first` delay is the wait before attempt `1`.
    pub fn from_config(cfg: &Config) -> Self {
        let mut retrier = Self::new();
        if let Some(attempts) = cfg.attempt_limit() {
            retrier = retrier.with_strategy(limit(attempts));
        }
        let policy = cfg.backoff;
        retrier.with_strategy(backoff(move |attempt: u32| policy.delay(attempt.saturating_sub(1))))
    }

    /// Appends a strategy; strategies run in the order they were added.
    pub fn with_strategy(mut self, strategy: impl Strategy<E> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Appends already boxed strategies.
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = BoxStrategy<E>>) -> Self {
        self.strategies.extend(strategies);
        self
    }

    /// Registers a subscriber for loop events.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Names the retried operation; the name is attached to every event.
    pub fn with_operation(mut self, operation: impl Into<Arc<str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Number of configured strategies.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }
}

impl<E: Sync> Default for Retrier<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_config_with_limit() {
        let r: Retrier<String> = Retrier::from_config(&Config::default());
        assert_eq!(r.strategy_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_first_retry_waits_first_delay() {
        use crate::Gate;
        use tokio::time::Instant;

        let started = Instant::now();
        let res: Result<(), _> = Retrier::from_config(&Config::default())
            .run(&Gate::new(), |_| async { Err("down") })
            .await;

        assert_eq!(res.unwrap_err().into_failure(), Some("down"));
        // 100ms before attempt 1, 200ms before attempt 2
        let waited = started.elapsed();
        assert!(
            waited >= Duration::from_millis(300) && waited < Duration::from_millis(310),
            "waited {waited:?}"
        );
    }

    #[test]
    fn test_from_config_unlimited() {
        let cfg = Config {
            attempts: 0,
            ..Config::default()
        };
        let r: Retrier<String> = Retrier::from_config(&cfg);
        assert_eq!(r.strategy_count(), 1);
    }
}
