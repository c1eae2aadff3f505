//! Error types produced by a retry invocation.
//!
//! [`RetryError`] is the failure half of an invocation outcome. Exactly one of
//! its variants is produced when the loop does not end in success:
//!
//! - [`RetryError::Interrupted`] the breaker closed or the cancellation signal fired.
//! - [`RetryError::Failed`] a strategy gave up; carries the last action failure.
//! - [`RetryError::Recovered`] the action panicked; carries the captured payload.
//!
//! Like the rest of the crate's errors it provides helper methods
//! (`as_label`, `as_message`) for logging/metrics.

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Textual form of [`RetryError::Interrupted`].
pub const INTERRUPTED: &str = "interrupted";

/// # Terminal failure of a retry invocation.
///
/// Interruption and recovered panics are never retried and never conflated
/// with an ordinary action failure; use the predicates rather than comparing
/// strings.
///
/// # Example
/// ```
/// use retryvisor::RetryError;
///
/// let err: RetryError<std::io::Error> = RetryError::Interrupted;
/// assert!(err.is_interrupted());
/// assert_eq!(err.to_string(), "interrupted");
/// assert_eq!(err.as_label(), "retry_interrupted");
/// ```
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Breaker closed (or cancellation fired) before or during an attempt, or during a wait.
    #[error("interrupted")]
    Interrupted,

    /// A strategy decided to stop; holds the failure returned by the last attempt.
    #[error("{0}")]
    Failed(E),

    /// The action panicked; the loop stopped without retrying.
    #[error("recovered panic: {0}")]
    Recovered(Panic),
}

impl<E> RetryError<E> {
    /// Returns `true` for [`RetryError::Interrupted`].
    pub fn is_interrupted(&self) -> bool {
        matches!(self, RetryError::Interrupted)
    }

    /// Returns the captured panic if the action panicked.
    ///
    /// # Example
    /// ```
    /// use retryvisor::{Panic, RetryError};
    ///
    /// let err: RetryError<String> = RetryError::Recovered(Panic::new(Box::new("boom")));
    /// let cause = err.recovered().and_then(|p| p.message());
    /// assert_eq!(cause, Some("boom"));
    /// ```
    pub fn recovered(&self) -> Option<&Panic> {
        match self {
            RetryError::Recovered(panic) => Some(panic),
            _ => None,
        }
    }

    /// Returns the last action failure, if that is what ended the loop.
    pub fn failure(&self) -> Option<&E> {
        match self {
            RetryError::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Consumes the error, returning the last action failure if there is one.
    pub fn into_failure(self) -> Option<E> {
        match self {
            RetryError::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Interrupted => "retry_interrupted",
            RetryError::Failed(_) => "retry_failed",
            RetryError::Recovered(_) => "retry_recovered_panic",
        }
    }
}

impl<E: fmt::Display> RetryError<E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::Interrupted => INTERRUPTED.to_string(),
            RetryError::Failed(err) => format!("error: {err}"),
            RetryError::Recovered(panic) => format!("panic: {panic}"),
        }
    }
}

/// Payload of a panic raised by the action.
///
/// The payload is kept as-is (the value passed to `panic!`), so callers can
/// downcast it to whatever type was thrown.
pub struct Panic {
    payload: Box<dyn Any + Send>,
}

impl Panic {
    /// Wraps a payload obtained from `catch_unwind`.
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Borrows the original payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        self.payload.as_ref()
    }

    /// Attempts to view the payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns the panic message when the payload is a `&str` or a `String`.
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            return Some(s);
        }
        self.payload.downcast_ref::<String>().map(String::as_str)
    }

    /// Returns the original payload, e.g. for `std::panic::resume_unwind`.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or("non-string payload"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_display_is_literal() {
        let err: RetryError<String> = RetryError::Interrupted;
        assert_eq!(err.to_string(), INTERRUPTED);
        assert!(err.is_interrupted());
        assert!(err.recovered().is_none());
        assert!(err.failure().is_none());
    }

    #[test]
    fn test_failed_is_transparent() {
        let err = RetryError::Failed("two iterations".to_string());
        assert_eq!(err.to_string(), "two iterations");
        assert!(!err.is_interrupted());
        assert_eq!(err.as_label(), "retry_failed");
        assert_eq!(err.into_failure().as_deref(), Some("two iterations"));
    }

    #[test]
    fn test_panic_payload_kinds() {
        let p = Panic::new(Box::new(String::from("owned")));
        assert_eq!(p.message(), Some("owned"));

        let p = Panic::new(Box::new(42_u8));
        assert_eq!(p.message(), None);
        assert_eq!(p.downcast_ref::<u8>(), Some(&42));
        assert_eq!(p.to_string(), "non-string payload");
    }

    #[test]
    fn test_recovered_is_not_a_failure() {
        let err: RetryError<String> = RetryError::Recovered(Panic::new(Box::new("boom")));
        assert!(err.recovered().is_some());
        assert!(err.failure().is_none());
        assert_eq!(err.as_message(), "panic: boom");
    }
}
