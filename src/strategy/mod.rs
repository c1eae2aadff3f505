//! Strategies: continue-or-stop decisions after a failed attempt.
//!
//! A [`Strategy`] is consulted with the index of the attempt that just failed
//! and its failure. The loop evaluates the configured strategies strictly
//! left-to-right; the first one that answers `false` stops the loop and the
//! rest are not evaluated.
//!
//! ## Contents
//! - [`limit`] cap the total number of attempts
//! - [`delay`], [`wait`], [`backoff`], [`backoff_with_jitter`] interruptible waits
//! - [`check_error`] continue only when a [`Classifier`](crate::classifier::Classifier) says `Retry`
//! - any `FnMut(u32, &E) -> bool` closure
//!
//! ## Ownership
//! Strategies take `&mut self` and may keep private state. They are boxed and
//! moved into one invocation, so an instance is never shared between
//! concurrently running invocations.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::strategies;
//! use retryvisor::strategy::{BoxStrategy, delay, limit};
//!
//! let list: Vec<BoxStrategy<std::io::Error>> = strategies![
//!     limit(5),
//!     delay(Duration::from_millis(50)),
//!     |_attempt: u32, err: &std::io::Error| err.kind() != std::io::ErrorKind::NotFound,
//! ];
//! assert_eq!(list.len(), 3);
//! ```

use async_trait::async_trait;

use crate::breaker::Breaker;

mod classify;
mod limit;
mod wait;

pub use classify::{CheckError, check_error};
pub use limit::{Limit, limit};
pub use wait::{Delay, Wait, WaitBackoff, backoff, backoff_with_jitter, delay, wait};

/// Boxed strategy, the element type of a strategy list.
pub type BoxStrategy<E> = Box<dyn Strategy<E>>;

/// Predicate deciding whether to continue after a failed attempt.
///
/// `breaker` is the gate guarding the invocation; waiting strategies must
/// race their wait against it (see [`Breaker::wait`]) and answer `false` when
/// it closes.
#[async_trait]
pub trait Strategy<E: Sync>: Send {
    /// Returns `true` to permit another attempt.
    async fn check(&mut self, attempt: u32, err: &E, breaker: &dyn Breaker) -> bool;
}

#[async_trait]
impl<E, F> Strategy<E> for F
where
    E: Sync,
    F: FnMut(u32, &E) -> bool + Send,
{
    async fn check(&mut self, attempt: u32, err: &E, _breaker: &dyn Breaker) -> bool {
        self(attempt, err)
    }
}

/// Boxes a list of strategies into a `Vec<BoxStrategy<_>>`.
///
/// Closures need their argument types spelled out (`|attempt: u32, err: &E|`).
#[macro_export]
macro_rules! strategies {
    () => {
        ::std::vec::Vec::new()
    };
    ($($strategy:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($strategy) as $crate::strategy::BoxStrategy<_>),+]
    };
}
