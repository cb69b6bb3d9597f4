//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [starting] probe=redis-app-ping attempt=1
//! [failed] probe=redis-app-ping attempt=1
//! [backoff] probe=redis-app-ping delay=200ms after_attempt=1
//! [timeout] probe=redis-app-ping attempt=2 budget=5s
//! [matched] probe=redis-app-ping attempt=3
//! [deadline-exceeded] probe=redis-app-ping reason="app did not respond"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Intended for development and examples. Implement a custom [`Subscribe`]
/// for structured logging or metrics collection.
pub struct LogWriter;

fn probe_of(e: &Event) -> &str {
    e.probe.as_deref().unwrap_or("-")
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn handle(&self, e: &Event) {
        let probe = probe_of(e);
        match e.kind {
            EventKind::AttemptStarting => {
                if let Some(att) = e.attempt {
                    println!("[starting] probe={probe} attempt={att}");
                }
            }
            EventKind::AttemptMatched => {
                println!("[matched] probe={probe} attempt={:?}", e.attempt);
            }
            EventKind::AttemptFailed => {
                println!("[failed] probe={probe} attempt={:?}", e.attempt);
            }
            EventKind::AttemptTimeout => {
                println!(
                    "[timeout] probe={probe} attempt={:?} budget={:?}",
                    e.attempt, e.timeout
                );
            }
            EventKind::SpawnFailed => {
                println!("[spawn-failed] probe={probe} reason={:?}", e.reason);
            }
            EventKind::BackoffScheduled => {
                println!(
                    "[backoff] probe={probe} delay={:?} after_attempt={:?}",
                    e.delay, e.attempt
                );
            }
            EventKind::DeadlineExceeded => {
                println!("[deadline-exceeded] probe={probe} reason={:?}", e.reason);
            }
            EventKind::RunCanceled => {
                println!("[canceled] probe={probe}");
            }
        }
    }
}
