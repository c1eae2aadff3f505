//! # retryvisor
//!
//! **Retryvisor** runs a fallible async action repeatedly until it succeeds,
//! a strategy gives up, or a breaker is closed.
//!
//! It provides backoff algorithms, composable continue-or-stop strategies, a
//! cancellable breaker and a retry loop that isolates panics raised by the
//! action. The crate is designed as a building block for clients, agents and
//! supervisors that need retries without owning a runtime.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    limit     │   │   backoff    │   │ check_error  │
//!     │  (strategy)  │   │  (strategy)  │   │  (strategy)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Retrier (one invocation)                                         │
//! │  - strategies (evaluated left-to-right after each failure)        │
//! │  - SubscriberSet (fans out loop events)                           │
//! │  - operation name (attached to every event)                       │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        ▼                                              ▼
//! ┌──────────────┐  closed() / is_open()   ┌──────────────────────────┐
//! │   Breaker    │◄────────────────────────│ action(attempt) isolated │
//! │ Gate/Deadline│                         │ by catch_unwind          │
//! └──────────────┘                         └──────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Retrier::run(breaker, action)
//!
//! loop {
//!   ├─► breaker closed?                      ─► Err(Interrupted)
//!   ├─► publish AttemptStarting{ attempt }
//!   ├─► run_once(action, attempt)
//!   │       ├─ Ok(value)                     ─► Ok(value)
//!   │       ├─ panic                         ─► Err(Recovered(panic))
//!   │       ├─ breaker closed meanwhile      ─► Err(Interrupted)
//!   │       └─ Err(e) ──► publish AttemptFailed
//!   ├─► strategies[0..n].check(attempt, &e, breaker)
//!   │       ├─ stop, breaker closed          ─► Err(Interrupted)
//!   │       ├─ stop                          ─► Err(Failed(e))
//!   │       └─ continue ──► publish RetryScheduled
//!   └─► attempt += 1
//! }
//!
//! On exit: breaker.release()
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Orchestration** | Run an action until it succeeds or the strategies stop.      | [`Retrier`], [`retry`], [`retry_with_token`] |
//! | **Strategies**    | Limits, interruptible waits, error classification, closures. | [`strategy::Strategy`], [`strategies!`]  |
//! | **Backoff**       | Pure `attempt → delay` algorithms with optional jitter.      | [`backoff::Backoff`], [`BackoffPolicy`]  |
//! | **Breakers**      | Cancellable gates, deadlines, cancellation tokens.           | [`Breaker`], [`Gate`], [`Deadline`]      |
//! | **Subscriber API**| Hook into loop events (logging, metrics, custom).            | [`Subscribe`], [`Event`]                 |
//! | **Errors**        | Typed outcome with recovered panic payloads.                 | [`RetryError`], [`Panic`]                |
//! | **Configuration** | Data-driven setup of the usual limit + backoff pair.         | [`Config`]                               |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`tracing`](https://docs.rs/tracing) backed `LogWriter`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Gate, Retrier, strategies};
//! use retryvisor::backoff::Exponential;
//! use retryvisor::strategy::{backoff, limit};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let gate = Gate::new();
//!
//!     let res = Retrier::new()
//!         .with_operation("handshake")
//!         .with_strategies(strategies![
//!             limit(5),
//!             backoff(Exponential::new(Duration::from_millis(1), 2)),
//!         ])
//!         .run(&gate, |attempt| async move {
//!             if attempt < 3 { Err(format!("refused #{attempt}")) } else { Ok("connected") }
//!         })
//!         .await;
//!
//!     assert_eq!(res.unwrap(), "connected");
//! }
//! ```
pub mod backoff;
mod breaker;
pub mod classifier;
mod core;
mod error;
mod events;
pub mod strategy;
mod subscribers;

// ---- Public re-exports ----

pub use backoff::{BackoffPolicy, JitterPolicy};
pub use breaker::{Breaker, Deadline, Gate};
pub use crate::core::{Config, Retrier, retry, retry_with_token};
pub use error::{INTERRUPTED, Panic, RetryError};
pub use events::{Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
