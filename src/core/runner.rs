//! # Run a single attempt of the action.
//!
//! Executes one attempt inside a panic isolation boundary and races it
//! against the breaker.
//!
//! ```text
//! action(attempt) ──► catch_unwind ──► future ──► catch_unwind(poll) ──┐
//!                         │                                            ├─► Done(Ok | Err)
//!                         └─ panic ──► Panicked(payload)               ├─► Panicked(payload)
//! breaker.closed() ────────────────────────────────────────────────────┴─► Interrupted
//! ```
//!
//! ## Rules
//! - Only the action is isolated: panics raised while constructing the future
//!   and while polling it are captured, nothing else.
//! - Closing wins when both sides are ready in the same poll (`biased`).
//! - An interrupted attempt's future is dropped; the action is expected to
//!   hold no state that needs an explicit shutdown.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use crate::breaker::Breaker;
use crate::error::Panic;

/// Result of one attempt.
pub(crate) enum Attempt<T, E> {
    /// The action completed.
    Done(Result<T, E>),
    /// The breaker closed before the action completed.
    Interrupted,
    /// The action panicked.
    Panicked(Panic),
}

/// Executes attempt `attempt` of `action`, racing it against `breaker`.
pub(crate) async fn run_once<T, E, F, Fut>(
    action: &mut F,
    attempt: u32,
    breaker: &dyn Breaker,
) -> Attempt<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let fut = match panic::catch_unwind(AssertUnwindSafe(|| action(attempt))) {
        Ok(fut) => fut,
        Err(payload) => return Attempt::Panicked(Panic::new(payload)),
    };

    let guarded = AssertUnwindSafe(fut).catch_unwind();
    tokio::pin!(guarded);

    tokio::select! {
        biased;
        _ = breaker.closed() => Attempt::Interrupted,
        res = &mut guarded => match res {
            Ok(out) => Attempt::Done(out),
            Err(payload) => Attempt::Panicked(Panic::new(payload)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gate;
    use std::time::Duration;

    #[tokio::test]
    async fn test_done() {
        let gate = Gate::new();
        let mut action = |attempt: u32| async move { Ok::<u32, String>(attempt * 10) };
        assert!(matches!(run_once(&mut action, 4, &gate).await, Attempt::Done(Ok(40))));
    }

    #[tokio::test]
    async fn test_panic_while_polling() {
        let gate = Gate::new();
        let mut action = |_: u32| async { panic!("Catch Me If You Can") };
        match run_once::<(), String, _, _>(&mut action, 0, &gate).await {
            Attempt::Panicked(p) => assert_eq!(p.message(), Some("Catch Me If You Can")),
            _ => panic!("expected a captured panic"),
        }
    }

    #[tokio::test]
    async fn test_panic_while_building_future() {
        let gate = Gate::new();
        let mut action = |_: u32| -> std::future::Ready<Result<(), String>> { panic!("too early") };
        match run_once(&mut action, 0, &gate).await {
            Attempt::Panicked(p) => assert_eq!(p.message(), Some("too early")),
            _ => panic!("expected a captured panic"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_interrupts_running_attempt() {
        let gate = Gate::new();
        let handle = gate.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.close();
        });

        let mut action = |_: u32| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<(), String>(())
        };
        assert!(matches!(run_once(&mut action, 0, &gate).await, Attempt::Interrupted));
    }

    #[tokio::test]
    async fn test_closed_wins_over_ready_action() {
        let gate = Gate::pre_closed();
        let mut action = |_: u32| async { Err::<(), _>("boom") };
        assert!(matches!(run_once(&mut action, 0, &gate).await, Attempt::Interrupted));
    }
}
