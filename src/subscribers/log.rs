//! # LogWriter: events to `tracing`
//!
//! A subscriber that writes incoming [`Event`]s as structured `tracing`
//! records. Install any `tracing` subscriber (e.g. `tracing-subscriber`'s
//! `fmt`) to see them.
//!
//! ## Levels
//! - `AttemptStarting`, `RetryScheduled`: DEBUG
//! - `Succeeded`: INFO after a retry, DEBUG on the first attempt
//! - `AttemptFailed`, `Interrupted`: WARN
//! - `Exhausted`, `PanicRecovered`: ERROR
//!
//! ## Example output
//! ```text
//! DEBUG retryvisor: starting attempt operation="fetch" attempt=0
//!  WARN retryvisor: attempt failed operation="fetch" attempt=0 error=connection refused
//! DEBUG retryvisor: retry scheduled operation="fetch" attempt=0 waited_ms=100
//!  INFO retryvisor: succeeded after retry operation="fetch" attempt=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let operation = e.operation.as_deref().unwrap_or("retry");
        let attempt = e.attempt.unwrap_or_default();
        let error = e.error.as_deref().unwrap_or("");

        match e.kind {
            EventKind::AttemptStarting => {
                tracing::debug!(target: "retryvisor", operation, attempt, "starting attempt");
            }
            EventKind::AttemptFailed => {
                tracing::warn!(target: "retryvisor", operation, attempt, error, "attempt failed");
            }
            EventKind::RetryScheduled => {
                let waited_ms = e.delay.map(|d| d.as_millis() as u64).unwrap_or_default();
                tracing::debug!(target: "retryvisor", operation, attempt, waited_ms, "retry scheduled");
            }
            EventKind::Succeeded if attempt > 0 => {
                tracing::info!(target: "retryvisor", operation, attempt, "succeeded after retry");
            }
            EventKind::Succeeded => {
                tracing::debug!(target: "retryvisor", operation, "succeeded on first attempt");
            }
            EventKind::Exhausted => {
                tracing::error!(target: "retryvisor", operation, attempt, error, "retry gave up");
            }
            EventKind::Interrupted => {
                tracing::warn!(target: "retryvisor", operation, attempt, "interrupted");
            }
            EventKind::PanicRecovered => {
                tracing::error!(target: "retryvisor", operation, attempt, panic = error, "action panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_every_kind() {
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::TRACE)
                .with_test_writer()
                .finish(),
        );

        let writer = LogWriter::new();
        for kind in [
            EventKind::AttemptStarting,
            EventKind::AttemptFailed,
            EventKind::RetryScheduled,
            EventKind::Succeeded,
            EventKind::Exhausted,
            EventKind::Interrupted,
            EventKind::PanicRecovered,
        ] {
            writer
                .on_event(&Event::new(kind).with_attempt(1).with_error("boom"))
                .await;
        }
        assert_eq!(writer.name(), "LogWriter");
    }
}
