//! # probevisor
//!
//! **Probevisor** is a retry/backoff polling engine for externally
//! observable probes.
//!
//! It repeatedly spawns a checkable unit of work (an HTTP probe, a
//! subprocess), inspects its accumulated output against a success predicate,
//! and governs the spacing and total duration of retries under a pluggable
//! backoff policy. It was built for smoke-test harnesses that wait for a
//! deployed application to start answering, but any "poll an external thing
//! until it says the right words" loop fits.
//!
//! The engine does not execute processes or speak HTTP itself: the caller
//! supplies a [`Spawn`] factory producing [`Session`]s, and the engine owns
//! only the scheduling and termination policy for repeated attempts.
//!
//! ## Architecture
//! ```text
//!  ┌───────────────┐   ┌────────────────┐   ┌────────────────┐
//!  │ BackoffPolicy │   │ MatchPredicate │   │ Spawn factory  │
//!  │ (shared, Copy)│   │ (shared)       │   │ (caller's)     │
//!  └──────┬────────┘   └──────┬─────────┘   └──────┬─────────┘
//!         ▼                   ▼                    ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  RetrySession (one logical check)                         │
//! │                                                           │
//! │  run_until_satisfied(token):                              │
//! │    loop {                                                 │
//! │      ├─► spawn fresh Session (at most one live)           │
//! │      ├─► poll output vs predicate, bounded by             │
//! │      │   min(attempt budget, overall deadline)            │
//! │      ├─► terminate session (every exit path)              │
//! │      ├─► Matched ──────────────► Ok(())                   │
//! │      └─► sleep backoff.next(i), clamped to remaining      │
//! │    }                                                      │
//! └──────────────────────────┬────────────────────────────────┘
//!                            ▼
//!                   Bus (broadcast events)
//!                            ▼
//!               forward() ─► Subscribe impls (LogWriter, ...)
//! ```
//!
//! ## Failure semantics
//! Transient conditions (no match yet, an attempt timing out) are absorbed
//! and drive another attempt. Only terminal failures escape:
//! [`RetryError::DeadlineExceeded`] and [`RetryError::AttemptsExhausted`]
//! carry the caller's failure message verbatim; [`RetryError::Spawn`] aborts
//! immediately without retrying; [`RetryError::Canceled`] reports an external
//! abort. On every exit path the live session has been terminated.
//!
//! ## Features
//! | Area           | Description                                              | Key types / traits                    |
//! |----------------|----------------------------------------------------------|---------------------------------------|
//! | **Sessions**   | One pollable external attempt; caller-supplied factory.  | [`Session`], [`Spawn`], [`SpawnFn`]   |
//! | **Predicates** | Decide success from output text.                         | [`MatchPredicate`], [`MatchOutcome`]  |
//! | **Policies**   | Space attempts: none/linear/exponential, optional jitter.| [`BackoffPolicy`], [`JitterPolicy`]   |
//! | **Control**    | Deadlines, attempt caps, cancellation, cleanup.          | [`RetrySession`], [`RetryConfig`]     |
//! | **Events**     | Observe attempts for logging or assertions.              | [`Event`], [`Bus`], [`Subscribe`]     |
//! | **Settings**   | JSON retry block from a harness config file.             | [`RetrySettings`]                     |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use probevisor::{
//!     BackoffKind, BackoffPolicy, BufferSession, MatchPredicate, RetryConfig, RetrySession,
//!     SessionRef, SpawnError, SpawnFn,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The factory runs one probe per attempt; here the "probe" is
//!     // immediate, in real use it would issue an HTTP request or start a
//!     // process and feed its output into the session.
//!     let factory = SpawnFn::new(|| async {
//!         let session = BufferSession::new();
//!         session.push("key not present");
//!         session.finish();
//!         Ok::<_, SpawnError>(Box::new(session) as SessionRef)
//!     });
//!
//!     let config = RetryConfig::new(
//!         Duration::from_secs(30),
//!         r#"{"FailReason": "Test app deployed but did not respond in time"}"#,
//!     )
//!     .with_probe("app-ping");
//!
//!     let controller = RetrySession::new(
//!         factory,
//!         config,
//!         BackoffPolicy::new(BackoffKind::Linear, Duration::from_millis(200)),
//!         MatchPredicate::contains("key not present"),
//!     );
//!
//!     controller.run().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod events;
mod policies;
mod predicate;
mod retry;
mod session;
mod subscribers;

// ---- Public re-exports ----

pub use config::RetrySettings;
pub use error::{ConfigError, RetryError, SpawnError};
pub use events::{Bus, Event, EventKind};
pub use policies::{BackoffKind, BackoffPolicy, JitterPolicy};
pub use predicate::{MatchOutcome, MatchPredicate};
pub use retry::{RetryConfig, RetrySession};
pub use session::{BufferSession, Session, SessionRef, Spawn, SpawnFn};
pub use subscribers::{forward, LogWriter, Subscribe};
