//! # Observe a single attempt.
//!
//! Polls one live session's output against the predicate until it matches,
//! the session exits, the attempt deadline passes, or the run is cancelled.
//!
//! ## Flow
//! ```text
//! loop {
//!   snapshot = session.output()
//!   predicate matched?        → Matched
//!   session terminal?         → re-check final snapshot → Matched | Exhausted
//!   attempt deadline passed?  → TimedOut
//!   sleep(poll_interval)  (cancellable)
//! }
//! ```
//!
//! ## Rules
//! - The observation never blocks on the session; deadlines are enforced by
//!   racing the poll sleep against the clock and the cancellation token.
//! - The caller owns the session and is responsible for terminating it after
//!   this returns, whatever the outcome.

use std::time::Duration;

use tokio::select;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::predicate::{MatchOutcome, MatchPredicate};
use crate::session::Session;

/// Outcome of observing one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Observation {
    /// The predicate matched the session's output.
    Matched,
    /// The session exited without a match.
    Exhausted,
    /// The attempt deadline passed while the session was still running.
    TimedOut,
    /// The run's cancellation token fired.
    Canceled,
}

/// Polls `session` against `predicate` until a decisive outcome.
///
/// `until` is the attempt deadline, already clamped to the overall deadline
/// by the caller.
pub(crate) async fn observe_once(
    session: &dyn Session,
    predicate: &MatchPredicate,
    until: Instant,
    poll_interval: Duration,
    token: &CancellationToken,
) -> Observation {
    loop {
        let snapshot = session.output();
        if predicate.evaluate(&snapshot) == MatchOutcome::Matched {
            return Observation::Matched;
        }

        if session.is_terminal() {
            // Output may land together with the exit; judge the final snapshot.
            let last = session.output();
            if last.len() > snapshot.len() && predicate.evaluate(&last) == MatchOutcome::Matched {
                return Observation::Matched;
            }
            return Observation::Exhausted;
        }

        let now = Instant::now();
        if now >= until {
            return Observation::TimedOut;
        }

        let wait = poll_interval.min(until - now);
        select! {
            _ = time::sleep(wait) => {}
            _ = token.cancelled() => return Observation::Canceled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BufferSession;

    fn far() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    const POLL: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn matches_immediately_available_output() {
        let session = BufferSession::new();
        session.push("success");
        let obs = observe_once(
            &session,
            &MatchPredicate::contains("success"),
            far(),
            POLL,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(obs, Observation::Matched);
    }

    #[tokio::test]
    async fn matches_output_arriving_later() {
        let session = BufferSession::new();
        let producer = session.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(30)).await;
            producer.push("key not present");
        });

        let obs = observe_once(
            &session,
            &MatchPredicate::contains("key not present"),
            far(),
            POLL,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(obs, Observation::Matched);
    }

    #[tokio::test]
    async fn exhausted_when_terminal_without_match() {
        let session = BufferSession::new();
        session.push("nope");
        session.finish();
        let obs = observe_once(
            &session,
            &MatchPredicate::contains("success"),
            far(),
            POLL,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(obs, Observation::Exhausted);
    }

    #[tokio::test]
    async fn times_out_when_session_never_exits() {
        let session = BufferSession::new();
        let obs = observe_once(
            &session,
            &MatchPredicate::contains("success"),
            Instant::now() + Duration::from_millis(40),
            POLL,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(obs, Observation::TimedOut);
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_poll_sleep() {
        let session = BufferSession::new();
        let token = CancellationToken::new();
        let canceler = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(20)).await;
            canceler.cancel();
        });

        let started = Instant::now();
        let obs = observe_once(
            &session,
            &MatchPredicate::contains("success"),
            far(),
            Duration::from_secs(10), // long poll sleep; cancel must cut it short
            &token,
        )
        .await;
        assert_eq!(obs, Observation::Canceled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
