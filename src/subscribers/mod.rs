//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] the
//! loop publishes through, plus a built-in [`LogWriter`] behind the `logging`
//! feature.
//!
//! ## Architecture
//! ```text
//! retry loop ── emit(Event) ──► SubscriberSet ──► Subscribe::on_event(&Event)
//!                                                   │
//!                                          ┌────────┼────────┐
//!                                          ▼        ▼        ▼
//!                                      LogWriter  Metrics  Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
