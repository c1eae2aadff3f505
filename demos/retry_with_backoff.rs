//! # Example: retry_with_backoff
//!
//! Demonstrates how [`Retrier`] retries a failing action according to a
//! [`Config`] (attempt limit plus [`BackoffPolicy`]) and how a [`Deadline`]
//! bounds the whole sequence.
//!
//! The action fails twice before succeeding, showing how backoff delay and
//! jitter are applied between attempts.
//!
//! ## Flow
//! ```text
//! Retrier::run()
//!   ├─► publish(AttemptStarting, attempt=0)
//!   ├─► action(0) → Err("boom #0")
//!   ├─► publish(AttemptFailed)
//!   ├─► limit(5) ok, backoff waits ≈100ms
//!   ├─► publish(RetryScheduled)
//!   ├─► attempt=1 → Err("boom #1") → waits ≈200ms
//!   ├─► attempt=2 → Ok("ready")
//!   └─► publish(Succeeded)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example retry_with_backoff --features logging
//! ```

use std::{sync::Arc, time::Duration};

use retryvisor::{BackoffPolicy, Config, Deadline, JitterPolicy, LogWriter, Retrier};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Route loop events to stdout
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 2. Up to 5 attempts, exponential backoff with equal jitter
    let cfg = Config {
        attempts: 5,
        backoff: BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(2),
            factor: 2.0,
            jitter: JitterPolicy::Equal,
        },
    };

    // 3. Give up entirely after 10 seconds
    let deadline = Deadline::after(Duration::from_secs(10));

    // 4. Run an action that fails 2 times before succeeding
    let value = Retrier::from_config(&cfg)
        .with_operation("flaky")
        .with_subscriber(Arc::new(LogWriter::new()))
        .run(&deadline, |attempt| async move {
            println!("[flaky] attempt {attempt}");
            if attempt < 2 {
                Err(format!("boom #{attempt}"))
            } else {
                Ok("ready")
            }
        })
        .await?;

    println!("[main] done: {value}");
    Ok(())
}
