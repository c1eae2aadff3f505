//! # The retry loop.
//!
//! Drives one invocation through its states until exactly one outcome is
//! reached:
//!
//! ```text
//! loop {
//!   ├─► Gate-Check   breaker closed?            ─► Interrupted
//!   ├─► publish AttemptStarting{ attempt }
//!   ├─► Execute      run_once(action, attempt)
//!   │       ├─ Ok(value)                        ─► Succeeded
//!   │       ├─ panic                            ─► Recovered(payload)
//!   │       ├─ breaker closed meanwhile         ─► Interrupted
//!   │       └─ Err(e) ──► publish AttemptFailed
//!   ├─► Evaluate     strategies left-to-right (waits happen inside them)
//!   │       ├─ any says stop, breaker closed    ─► Interrupted
//!   │       ├─ any says stop                    ─► Failed(e)
//!   │       └─ all continue ──► publish RetryScheduled
//!   └─► attempt += 1
//! }
//! on exit: breaker.release()
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**; at most one action future exists at a time.
//! - The attempt index starts at `0`, is never reset and saturates at `u32::MAX`.
//! - With no strategies exactly one attempt is made.
//! - Cancellation wins over every other outcome it races with.
//! - Panics from strategies, breakers and subscribers are not captured.

use std::fmt;
use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    breaker::Breaker,
    core::{
        builder::Retrier,
        runner::{Attempt, run_once},
    },
    error::RetryError,
    events::{Event, EventKind},
    strategy::BoxStrategy,
};

/// Retries `action` while `breaker` is open and every strategy agrees.
///
/// Shorthand for `Retrier::new().with_strategies(strategies).run(breaker, action)`.
///
/// # Example
/// ```rust
/// use retryvisor::{Gate, retry, strategies};
/// use retryvisor::strategy::limit;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let res: Result<(), _> = retry(&Gate::new(), |_attempt| async { Err("two iterations") }, strategies![limit(2)]).await;
/// assert_eq!(res.unwrap_err().to_string(), "two iterations");
/// # }
/// ```
pub async fn retry<B, T, E, F, Fut>(
    breaker: &B,
    action: F,
    strategies: Vec<BoxStrategy<E>>,
) -> Result<T, RetryError<E>>
where
    B: Breaker,
    E: fmt::Display + Send + Sync,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retrier::new()
        .with_strategies(strategies)
        .run(breaker, action)
        .await
}

/// Retries `action` until `token` is cancelled or a strategy gives up.
///
/// The action receives a child of `token`, which is cancelled once the
/// invocation has an outcome; `token` itself is never cancelled by the loop.
pub async fn retry_with_token<T, E, F, Fut>(
    token: &CancellationToken,
    action: F,
    strategies: Vec<BoxStrategy<E>>,
) -> Result<T, RetryError<E>>
where
    E: fmt::Display + Send + Sync,
    F: FnMut(CancellationToken, u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retrier::new()
        .with_strategies(strategies)
        .run_with_token(token, action)
        .await
}

/// Releases the breaker when the invocation ends, including when its future is dropped.
struct ReleaseGuard<'a>(&'a dyn Breaker);

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

impl<E> Retrier<E>
where
    E: fmt::Display + Send + Sync,
{
    /// Runs the invocation guarded by `breaker`, then releases the breaker.
    ///
    /// A pre-closed breaker yields [`RetryError::Interrupted`] without calling
    /// `action` at all.
    ///
    /// The attempt index is a `u32` and stops growing at `u32::MAX`; from then
    /// on every attempt and every strategy sees `u32::MAX`.
    pub async fn run<B, T, F, Fut>(mut self, breaker: &B, mut action: F) -> Result<T, RetryError<E>>
    where
        B: Breaker,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let breaker: &dyn Breaker = breaker;
        let _release = ReleaseGuard(breaker);
        self.drive(breaker, &mut action).await
    }

    /// Runs the invocation until `token` is cancelled.
    ///
    /// Each attempt receives a clone of a child token scoped to this
    /// invocation; the child is cancelled when the invocation ends.
    pub async fn run_with_token<T, F, Fut>(
        self,
        token: &CancellationToken,
        mut action: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(CancellationToken, u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let scope = token.child_token();
        let signal = scope.clone();
        self.run(&scope, move |attempt| action(signal.clone(), attempt))
            .await
    }

    async fn drive<T, F, Fut>(&mut self, breaker: &dyn Breaker, action: &mut F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt: u32 = 0;

        loop {
            if !breaker.is_open() {
                return self.interrupted(attempt).await;
            }
            self.emit(|| Event::new(EventKind::AttemptStarting).with_attempt(attempt))
                .await;

            let err = match run_once(action, attempt, breaker).await {
                Attempt::Done(Ok(value)) => {
                    self.emit(|| Event::new(EventKind::Succeeded).with_attempt(attempt))
                        .await;
                    return Ok(value);
                }
                Attempt::Done(Err(err)) => err,
                Attempt::Interrupted => return self.interrupted(attempt).await,
                Attempt::Panicked(panic) => {
                    self.emit(|| {
                        Event::new(EventKind::PanicRecovered)
                            .with_attempt(attempt)
                            .with_error(panic.to_string())
                    })
                    .await;
                    return Err(RetryError::Recovered(panic));
                }
            };
            self.emit(|| {
                Event::new(EventKind::AttemptFailed)
                    .with_attempt(attempt)
                    .with_error(err.to_string())
            })
            .await;

            let started = Instant::now();
            if !self.evaluate(attempt, &err, breaker).await {
                if !breaker.is_open() {
                    return self.interrupted(attempt).await;
                }
                self.emit(|| {
                    Event::new(EventKind::Exhausted)
                        .with_attempt(attempt)
                        .with_error(err.to_string())
                })
                .await;
                return Err(RetryError::Failed(err));
            }
            let waited = started.elapsed();
            self.emit(|| {
                Event::new(EventKind::RetryScheduled)
                    .with_attempt(attempt)
                    .with_delay(waited)
            })
            .await;

            attempt = attempt.saturating_add(1);
        }
    }

    /// Asks every strategy in order; the first `false` short-circuits.
    async fn evaluate(&mut self, attempt: u32, err: &E, breaker: &dyn Breaker) -> bool {
        if self.strategies.is_empty() {
            return false;
        }
        for strategy in self.strategies.iter_mut() {
            if !strategy.check(attempt, err, breaker).await {
                return false;
            }
        }
        true
    }

    async fn interrupted<T>(&mut self, attempt: u32) -> Result<T, RetryError<E>> {
        self.emit(|| Event::new(EventKind::Interrupted).with_attempt(attempt))
            .await;
        Err(RetryError::Interrupted)
    }

    async fn emit(&mut self, make: impl FnOnce() -> Event) {
        self.subscribers
            .emit_with(|| {
                let event = make();
                match &self.operation {
                    Some(operation) => event.with_operation(operation.clone()),
                    None => event,
                }
            })
            .await;
    }
}
