//! # Events emitted by a retry invocation.
//!
//! The [`EventKind`] enum classifies what happened in the loop; the [`Event`]
//! struct carries the metadata (attempt index, delay, failure message).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically, across all invocations in the process.
//!
//! ## Example
//! ```rust
//! use retryvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::AttemptFailed)
//!     .with_operation("fetch")
//!     .with_error("connection refused")
//!     .with_attempt(3);
//!
//! assert_eq!(ev.kind, EventKind::AttemptFailed);
//! assert_eq!(ev.operation.as_deref(), Some("fetch"));
//! assert_eq!(ev.error.as_deref(), Some("connection refused"));
//! assert!(!ev.is_terminal());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of loop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt lifecycle ===
    /// The gate was open and an attempt is about to run.
    ///
    /// Sets: `attempt`.
    AttemptStarting,

    /// The attempt returned a failure; strategies are about to be consulted.
    ///
    /// Sets: `attempt`, `error`.
    AttemptFailed,

    /// Every strategy agreed to continue; the next attempt follows.
    ///
    /// Sets: `attempt` (the one that failed), `delay` (time spent in strategies).
    RetryScheduled,

    // === Terminal ===
    /// The action succeeded.
    ///
    /// Sets: `attempt`.
    Succeeded,

    /// A strategy stopped the loop; the last failure is returned.
    ///
    /// Sets: `attempt`, `error`.
    Exhausted,

    /// The breaker closed (or cancellation fired).
    ///
    /// Sets: `attempt` (index of the attempt that would have run or was running).
    Interrupted,

    /// The action panicked; the panic was captured.
    ///
    /// Sets: `attempt`, `error` (panic message when it is a string).
    PanicRecovered,
}

/// Loop event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// 0-based attempt index.
    pub attempt: Option<u32>,
    /// Time spent waiting in strategies before the next attempt.
    pub delay: Option<Duration>,
    /// Failure or panic message.
    pub error: Option<Arc<str>>,
    /// Name of the retried operation, if the caller gave one.
    pub operation: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            attempt: None,
            delay: None,
            error: None,
            operation: None,
        }
    }

    /// Attaches an attempt index.
    #[inline]
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Attaches a delay.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Attaches a failure message.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches an operation name.
    #[inline]
    pub fn with_operation(mut self, operation: impl Into<Arc<str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Returns `true` for kinds that end an invocation.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Succeeded
                | EventKind::Exhausted
                | EventKind::Interrupted
                | EventKind::PanicRecovered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::AttemptStarting);
        let b = Event::new(EventKind::AttemptStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(Event::new(EventKind::Interrupted).is_terminal());
        assert!(Event::new(EventKind::PanicRecovered).is_terminal());
        assert!(!Event::new(EventKind::RetryScheduled).is_terminal());
    }
}
