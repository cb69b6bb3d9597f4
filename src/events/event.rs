//! # Runtime events emitted by the retry controller.
//!
//! [`EventKind`] classifies what happened during a run; [`Event`] carries the
//! metadata (probe label, attempt number, delay, reason, timestamp).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events from several
//! concurrent runs interleave on one bus.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use probevisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::BackoffScheduled)
//!     .with_probe("redis-app-ping")
//!     .with_attempt(3)
//!     .with_delay(Duration::from_millis(400));
//!
//! assert_eq!(ev.kind, EventKind::BackoffScheduled);
//! assert_eq!(ev.probe.as_deref(), Some("redis-app-ping"));
//! assert_eq!(ev.attempt, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of retry-run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A new attempt is being spawned.
    ///
    /// Sets: `probe`, `attempt` (1-based), `at`, `seq`.
    AttemptStarting,

    /// The predicate matched the current session's output.
    ///
    /// Sets: `probe`, `attempt`, `at`, `seq`.
    AttemptMatched,

    /// The session exited without the predicate matching.
    ///
    /// Sets: `probe`, `attempt`, `at`, `seq`.
    AttemptFailed,

    /// The attempt exceeded its per-attempt time budget and was terminated.
    ///
    /// Sets: `probe`, `attempt`, `timeout`, `at`, `seq`.
    AttemptTimeout,

    /// The session factory failed; the run aborts immediately.
    ///
    /// Sets: `probe`, `attempt`, `reason`, `at`, `seq`.
    SpawnFailed,

    /// The next attempt was scheduled after a backoff delay.
    ///
    /// Sets: `probe`, `attempt` (the one that just failed), `delay`, `at`, `seq`.
    BackoffScheduled,

    /// The overall deadline elapsed without a match.
    ///
    /// Sets: `probe`, `attempt`, `reason` (caller's failure message), `at`, `seq`.
    DeadlineExceeded,

    /// The run was abandoned via its cancellation token.
    ///
    /// Sets: `probe`, `attempt`, `at`, `seq`.
    RunCanceled,
}

/// A single lifecycle event with metadata.
///
/// Constructed with [`Event::now`] and enriched with the builder-style
/// `with_*` methods; unset fields stay `None`.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Label of the probe this run checks (from the controller config).
    pub probe: Option<String>,
    /// Attempt number, 1-based.
    pub attempt: Option<u32>,
    /// Backoff delay, for [`EventKind::BackoffScheduled`].
    pub delay: Option<Duration>,
    /// Per-attempt budget, for [`EventKind::AttemptTimeout`].
    pub timeout: Option<Duration>,
    /// Failure detail (factory error, caller's failure message).
    pub reason: Option<String>,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
}

impl Event {
    /// Creates an event stamped with the current time and next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            probe: None,
            attempt: None,
            delay: None,
            timeout: None,
            reason: None,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Sets the probe label.
    pub fn with_probe(mut self, probe: impl Into<String>) -> Self {
        self.probe = Some(probe.into());
        self
    }

    /// Sets the attempt number (1-based).
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Sets the backoff delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the per-attempt budget that was exceeded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the failure detail.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_strictly_increasing() {
        let a = Event::now(EventKind::AttemptStarting);
        let b = Event::now(EventKind::AttemptStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builder_sets_only_requested_fields() {
        let ev = Event::now(EventKind::AttemptTimeout)
            .with_attempt(2)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(ev.attempt, Some(2));
        assert_eq!(ev.timeout, Some(Duration::from_secs(5)));
        assert!(ev.probe.is_none());
        assert!(ev.delay.is_none());
        assert!(ev.reason.is_none());
    }
}
