//! Runtime core: the retry orchestrator.
//!
//! The public API from this module is [`Retrier`] and the [`retry`] /
//! [`retry_with_token`] shorthands.
//!
//! Internal modules:
//! - [`builder`]: assembles strategies, subscribers and the operation name;
//! - [`config`]: plain-data description of a common retry setup;
//! - [`retry`]: the attempt loop, outcome resolution and event publishing;
//! - [`runner`]: executes one attempt with panic isolation and cancellation.

mod builder;
mod config;
mod retry;
mod runner;

pub use builder::Retrier;
pub use config::Config;
pub use retry::{retry, retry_with_token};
