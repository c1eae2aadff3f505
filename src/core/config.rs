//! # Retry configuration.
//!
//! Provides [`Config`] the plain-data description of a common retry setup:
//! cap the attempts, wait with a capped exponential backoff in between.
//! [`Retrier::from_config`](crate::Retrier::from_config) turns it into a
//! strategy list.
//!
//! ## Sentinel values
//! - `attempts = 0` → unlimited (no `limit` strategy)

use crate::backoff::BackoffPolicy;

/// Configuration for [`Retrier::from_config`](crate::Retrier::from_config).
///
/// ## Field semantics
/// - `attempts`: Total attempts including the first one (`0` = unlimited)
/// - `backoff`: Wait before each retry
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Maximum number of attempts.
    ///
    /// - `0` = unlimited, stop only on the breaker
    /// - `n > 0` = at most `n` attempts
    pub attempts: u32,

    /// Backoff applied between attempts.
    pub backoff: BackoffPolicy,
}

impl Config {
    /// Returns the attempt limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` attempts
    #[inline]
    pub fn attempt_limit(&self) -> Option<u32> {
        if self.attempts == 0 {
            None
        } else {
            Some(self.attempts)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `attempts = 3`
    /// - `backoff = BackoffPolicy::default()` (100ms doubling, capped at 30s)
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: BackoffPolicy::default(),
        }
    }
}
