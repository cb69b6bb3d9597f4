//! # RetrySession: the retry orchestrator.
//!
//! Drives the spawn → observe → decide → wait loop for one logical check:
//! repeatedly asks the factory for a fresh session, polls its output against
//! the match predicate, and spaces attempts with the backoff policy, all
//! bounded by the overall deadline.
//!
//! ## Flow
//! ```text
//! run_until_satisfied(token)
//!
//! loop {
//!   ├─► deadline passed?           → Err(DeadlineExceeded)
//!   ├─► publish AttemptStarting
//!   ├─► factory.spawn()
//!   │     └─ Err  ───────────────► Err(Spawn)  (fatal, no retry)
//!   ├─► observe_once(session, predicate, min(attempt budget, deadline))
//!   ├─► session.terminate()        (every path)
//!   │     ├─ Matched   ──────────► Ok(())
//!   │     ├─ Canceled  ──────────► Err(Canceled)
//!   │     └─ Exhausted/TimedOut:
//!   │          ├─ deadline passed      → Err(DeadlineExceeded)
//!   │          ├─ attempt cap reached  → Err(AttemptsExhausted)
//!   │          ├─ publish BackoffScheduled
//!   │          └─ sleep(delay clamped to remaining)  (cancellable)
//!   └─ next attempt
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**: at most one live session per run.
//! - Every exit path terminates the active session, success included.
//! - No attempt is spawned after the overall deadline, even mid-backoff.
//! - Transient mismatches and attempt timeouts are absorbed; only the
//!   terminal [`RetryError`] kinds escape.

use tokio::select;
use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::RetryError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::BackoffPolicy;
use crate::predicate::MatchPredicate;
use crate::retry::config::RetryConfig;
use crate::retry::observe::{observe_once, Observation};
use crate::session::Spawn;

/// Orchestrates retries of one logical check.
///
/// Holds the caller-supplied session factory, the timing configuration, the
/// backoff policy, and the match predicate. Per-run state (attempt counter,
/// deadline) lives on the stack of [`run_until_satisfied`](Self::run_until_satisfied),
/// so a controller can be reused for consecutive runs; concurrent runs need
/// one controller each.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use probevisor::{
///     BackoffPolicy, BufferSession, MatchPredicate, RetryConfig, RetrySession, SessionRef,
///     SpawnError, SpawnFn,
/// };
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), probevisor::RetryError> {
/// let factory = SpawnFn::new(|| async {
///     let session = BufferSession::new();
///     session.push("success");
///     session.finish();
///     Ok::<_, SpawnError>(Box::new(session) as SessionRef)
/// });
///
/// let controller = RetrySession::new(
///     factory,
///     RetryConfig::new(Duration::from_secs(5), "probe did not respond"),
///     BackoffPolicy::default(),
///     MatchPredicate::contains("success"),
/// );
/// controller.run().await?;
/// # Ok(())
/// # }
/// ```
pub struct RetrySession<S> {
    factory: S,
    config: RetryConfig,
    backoff: BackoffPolicy,
    predicate: MatchPredicate,
    bus: Bus,
}

impl<S: Spawn> RetrySession<S> {
    /// Creates a controller for one logical check.
    pub fn new(
        factory: S,
        config: RetryConfig,
        backoff: BackoffPolicy,
        predicate: MatchPredicate,
    ) -> Self {
        let bus = Bus::new(config.bus_capacity_clamped());
        Self {
            factory,
            config,
            backoff,
            predicate,
            bus,
        }
    }

    /// Subscribes to this controller's lifecycle events.
    ///
    /// Pair with [`forward`](crate::forward) and a
    /// [`Subscribe`](crate::Subscribe) implementation for logging or metrics.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Runs until a session's output matches, without external cancellation.
    ///
    /// Shorthand for [`run_until_satisfied`](Self::run_until_satisfied) with
    /// a fresh token.
    pub async fn run(&self) -> Result<(), RetryError> {
        self.run_until_satisfied(CancellationToken::new()).await
    }

    /// Runs the retry loop until success, terminal failure, or cancellation.
    ///
    /// ### Terminal outcomes
    /// - `Ok(())` — some session's output matched before the deadline
    /// - [`RetryError::DeadlineExceeded`] — overall timeout, message surfaced
    ///   verbatim from the config
    /// - [`RetryError::AttemptsExhausted`] — configured attempt cap reached
    /// - [`RetryError::Spawn`] — the factory failed; fatal, never retried
    /// - [`RetryError::Canceled`] — `token` fired
    ///
    /// ### Cleanup guarantee
    /// Whatever the outcome, the active session has been terminated before
    /// this returns; no attempt keeps running behind the caller's back.
    pub async fn run_until_satisfied(&self, token: CancellationToken) -> Result<(), RetryError> {
        let started = Instant::now();
        let deadline = started + self.config.overall_timeout;
        let budget = self.config.attempt_budget();
        let poll = self.config.poll_interval_clamped();
        let mut attempt: u32 = 0;

        loop {
            if token.is_cancelled() {
                self.publish(Event::now(EventKind::RunCanceled).with_attempt(attempt));
                return Err(RetryError::Canceled);
            }
            if Instant::now() >= deadline {
                return Err(self.deadline_exceeded(started, attempt));
            }

            attempt += 1;
            self.publish(Event::now(EventKind::AttemptStarting).with_attempt(attempt));

            let session = match self.factory.spawn().await {
                Ok(session) => session,
                Err(e) => {
                    self.publish(
                        Event::now(EventKind::SpawnFailed)
                            .with_attempt(attempt)
                            .with_reason(e.to_string()),
                    );
                    return Err(RetryError::Spawn {
                        error: e.to_string(),
                    });
                }
            };

            let until = (Instant::now() + budget).min(deadline);
            let observation =
                observe_once(session.as_ref(), &self.predicate, until, poll, &token).await;
            session.terminate().await;
            drop(session);

            match observation {
                Observation::Matched => {
                    self.publish(Event::now(EventKind::AttemptMatched).with_attempt(attempt));
                    return Ok(());
                }
                Observation::Canceled => {
                    self.publish(Event::now(EventKind::RunCanceled).with_attempt(attempt));
                    return Err(RetryError::Canceled);
                }
                Observation::Exhausted => {
                    self.publish(Event::now(EventKind::AttemptFailed).with_attempt(attempt));
                }
                Observation::TimedOut => {
                    self.publish(
                        Event::now(EventKind::AttemptTimeout)
                            .with_attempt(attempt)
                            .with_timeout(budget),
                    );
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(self.deadline_exceeded(started, attempt));
            }
            if let Some(limit) = self.config.attempt_limit() {
                if attempt >= limit {
                    return Err(RetryError::AttemptsExhausted {
                        message: self.config.fail_message.clone(),
                        attempts: attempt,
                    });
                }
            }

            // First backoff uses index 0: attempt is the 1-based spawn count.
            let delay = self.backoff.next(attempt - 1).min(deadline - now);
            self.publish(
                Event::now(EventKind::BackoffScheduled)
                    .with_attempt(attempt)
                    .with_delay(delay),
            );
            select! {
                _ = time::sleep(delay) => {}
                _ = token.cancelled() => {
                    self.publish(Event::now(EventKind::RunCanceled).with_attempt(attempt));
                    return Err(RetryError::Canceled);
                }
            }
        }
    }

    fn deadline_exceeded(&self, started: Instant, attempt: u32) -> RetryError {
        self.publish(
            Event::now(EventKind::DeadlineExceeded)
                .with_attempt(attempt)
                .with_reason(self.config.fail_message.clone()),
        );
        RetryError::DeadlineExceeded {
            message: self.config.fail_message.clone(),
            elapsed: started.elapsed(),
        }
    }

    fn publish(&self, ev: Event) {
        match &self.config.probe {
            Some(probe) => self.bus.publish(ev.with_probe(probe.clone())),
            None => self.bus.publish(ev),
        }
    }
}
