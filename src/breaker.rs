//! # Breakers: cancellable gates around a retry sequence.
//!
//! A [`Breaker`] has two observable states:
//! - **Open** attempts are permitted;
//! - **Closed** no further attempts are permitted (terminal, never reopens).
//!
//! The loop checks the gate before every attempt and races the attempt itself
//! and every strategy wait against [`Breaker::closed`]. Closing may happen from
//! any task or thread; it is idempotent and may be called after the invocation
//! has finished.
//!
//! ## Implementations
//! - [`Gate`] clonable handle; single-use ([`Gate::new`]) or reusable
//!   ([`Gate::reusable`]); [`Gate::pre_closed`] for the zero-attempt case.
//! - [`Deadline`] a gate that also closes itself at an instant.
//! - [`CancellationToken`] open until cancelled.
//!
//! ## Release
//! When an invocation reaches its outcome the loop calls [`Breaker::release`].
//! By default that closes the breaker, which makes it single-use; a reusable
//! [`Gate`] ignores the release so it can guard several sequential invocations.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Cancellable gate controlling whether further attempts are permitted.
///
/// Implementations must make `close` safe to call concurrently with the loop
/// reading `is_open`, and must keep `closed()` pending while the gate is open.
#[async_trait]
pub trait Breaker: Send + Sync {
    /// Returns `true` while attempts are permitted.
    fn is_open(&self) -> bool;

    /// Closes the gate. Idempotent.
    fn close(&self);

    /// Completes once the gate is closed.
    async fn closed(&self);

    /// Called by the loop once the invocation has an outcome.
    fn release(&self) {
        self.close();
    }

    /// Sleeps for `delay` unless the gate closes first.
    ///
    /// Returns `true` only if the full delay elapsed and the gate is still open.
    /// Closing wins when both become ready together.
    async fn wait(&self, delay: Duration) -> bool {
        if delay.is_zero() || !self.is_open() {
            return self.is_open();
        }
        let sleep = time::sleep(delay);
        tokio::pin!(sleep);

        tokio::select! {
            biased;
            _ = self.closed() => false,
            _ = &mut sleep => self.is_open(),
        }
    }
}

#[async_trait]
impl Breaker for CancellationToken {
    fn is_open(&self) -> bool {
        !self.is_cancelled()
    }

    fn close(&self) {
        self.cancel();
    }

    async fn closed(&self) {
        self.cancelled().await;
    }
}

/// Cancellable gate backed by a [`CancellationToken`].
///
/// Clones share state: keep one clone to close the gate from another task
/// while the loop holds the other.
///
/// # Example
/// ```
/// use retryvisor::{Breaker, Gate};
///
/// let gate = Gate::new();
/// let handle = gate.clone();
/// assert!(gate.is_open());
///
/// handle.close();
/// handle.close();
/// assert!(!gate.is_open());
/// ```
#[derive(Clone, Debug)]
pub struct Gate {
    token: CancellationToken,
    reusable: bool,
}

impl Gate {
    /// Single-use gate: the loop closes it when the invocation ends.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            reusable: false,
        }
    }

    /// Gate that survives the end of an invocation; only [`Breaker::close`] closes it.
    pub fn reusable() -> Self {
        Self {
            token: CancellationToken::new(),
            reusable: true,
        }
    }

    /// Gate that starts closed. Any invocation through it makes zero attempts.
    pub fn pre_closed() -> Self {
        let gate = Self::new();
        gate.token.cancel();
        gate
    }

    /// Returns `true` if the loop leaves this gate open on completion.
    pub fn is_reusable(&self) -> bool {
        self.reusable
    }

    /// Token that is cancelled when the gate closes.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Breaker for Gate {
    fn is_open(&self) -> bool {
        !self.token.is_cancelled()
    }

    fn close(&self) {
        self.token.cancel();
    }

    async fn closed(&self) {
        self.token.cancelled().await;
    }

    fn release(&self) {
        if !self.reusable {
            self.token.cancel();
        }
    }
}

/// Gate that closes itself once a deadline is reached.
///
/// Can also be closed early with [`Breaker::close`]. Uses the tokio clock.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::{Breaker, Deadline};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let deadline = Deadline::after(Duration::from_secs(60));
/// assert!(deadline.is_open());
/// deadline.close();
/// assert!(!deadline.is_open());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Deadline {
    token: CancellationToken,
    at: Instant,
}

impl Deadline {
    /// Closes at `at`.
    pub fn at(at: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            at,
        }
    }

    /// Closes `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        Self::at(now.checked_add(timeout).unwrap_or_else(|| far_future(now)))
    }

    /// The instant at which the gate closes by itself.
    pub fn deadline(&self) -> Instant {
        self.at
    }

    /// Time left before the deadline, zero once passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

#[async_trait]
impl Breaker for Deadline {
    fn is_open(&self) -> bool {
        !self.token.is_cancelled() && Instant::now() < self.at
    }

    fn close(&self) {
        self.token.cancel();
    }

    async fn closed(&self) {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {}
            _ = time::sleep_until(self.at) => self.token.cancel(),
        }
    }
}

/// Roughly thirty years ahead; tokio's own "never" horizon.
fn far_future(now: Instant) -> Instant {
    now + Duration::from_secs(86_400 * 365 * 30)
}
