//! Loop events: types published to subscribers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: the retry loop (`core::retry`), once per state transition.
//! - **Consumers**: [`Subscribe`](crate::Subscribe) implementations registered on a
//!   [`Retrier`](crate::Retrier).
//!
//! ```text
//! Gate-Check ──► AttemptStarting ──► Execute ──┬─► Succeeded
//!     ▲                                        ├─► PanicRecovered
//!     │                                        ├─► Interrupted
//!     │                                        └─► AttemptFailed ──► Evaluate
//!     │                                                                │
//!     └──────────────── RetryScheduled ◄───────────── continue ◄───────┤
//!                                                     stop ──► Exhausted / Interrupted
//! ```

mod event;

pub use event::{Event, EventKind};
