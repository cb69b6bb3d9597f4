//! # Session trait and factory abstraction.
//!
//! This module defines the [`Session`] trait (pollable, terminable) and the
//! [`Spawn`] factory that produces one session per attempt. The common handle
//! type is [`SessionRef`], a `Box<dyn Session>` owned exclusively by the
//! controller for the duration of one attempt.
//!
//! Spawning may have externally visible effects (issuing an HTTP request,
//! starting a process); the controller never holds more than one live session
//! per run.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SpawnError;

/// # One externally observable attempt.
///
/// A session is launched by a [`Spawn`] factory, produces output
/// incrementally, and eventually exits. The controller polls
/// [`output`](Session::output) and [`is_terminal`](Session::is_terminal)
/// rather than blocking on completion, so deadlines can be enforced from the
/// outside.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use probevisor::Session;
///
/// struct Done;
///
/// #[async_trait]
/// impl Session for Done {
///     fn output(&self) -> String { "success".into() }
///     fn is_terminal(&self) -> bool { true }
///     async fn terminate(&self) {}
/// }
/// ```
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns a snapshot of the output accumulated so far.
    ///
    /// The underlying output is append-only: successive snapshots only grow.
    /// Safe to call repeatedly while the session runs.
    fn output(&self) -> String;

    /// Returns `true` once the underlying attempt has exited.
    fn is_terminal(&self) -> bool;

    /// Best-effort forced termination. Idempotent.
    ///
    /// Called by the controller when it abandons an attempt (per-attempt
    /// timeout, overall deadline, cancellation) and after a successful match,
    /// so no attempt keeps running behind the controller's back.
    async fn terminate(&self);
}

impl std::fmt::Debug for dyn Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

/// Owned handle to a session. One per attempt, dropped when the attempt ends.
pub type SessionRef = Box<dyn Session>;

/// # Factory producing a fresh [`Session`] per attempt.
///
/// Supplied by the caller per use-site ("issue HTTP GET to this URL", "run
/// this probe command"). A factory error is fatal to the run: the controller
/// reports it without retrying.
#[async_trait]
pub trait Spawn: Send + Sync {
    /// Starts a new attempt.
    async fn spawn(&self) -> Result<SessionRef, SpawnError>;
}

#[async_trait]
impl<S: Spawn + ?Sized> Spawn for Arc<S> {
    async fn spawn(&self) -> Result<SessionRef, SpawnError> {
        (**self).spawn().await
    }
}

/// Function-backed session factory.
///
/// Wraps a closure that *creates* a new session per spawn, so each attempt
/// owns its state and no mutable state is shared between attempts.
///
/// ## Example
/// ```rust
/// use probevisor::{BufferSession, SessionRef, SpawnError, SpawnFn};
///
/// let factory = SpawnFn::new(|| async {
///     let session = BufferSession::new();
///     session.push("pong");
///     session.finish();
///     Ok::<_, SpawnError>(Box::new(session) as SessionRef)
/// });
/// ```
#[derive(Debug)]
pub struct SpawnFn<F> {
    f: F,
}

impl<F> SpawnFn<F> {
    /// Creates a new function-backed factory.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Spawn for SpawnFn<F>
where
    F: Fn() -> Fut + Send + Sync, // Fn, not FnMut
    Fut: Future<Output = Result<SessionRef, SpawnError>> + Send,
{
    async fn spawn(&self) -> Result<SessionRef, SpawnError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BufferSession;

    #[tokio::test]
    async fn spawn_fn_produces_fresh_sessions() {
        let factory = SpawnFn::new(|| async {
            let s = BufferSession::new();
            s.push("hello");
            Ok::<_, SpawnError>(Box::new(s) as SessionRef)
        });

        let a = factory.spawn().await.unwrap();
        let b = factory.spawn().await.unwrap();
        assert_eq!(a.output(), "hello");
        assert_eq!(b.output(), "hello");
    }

    #[tokio::test]
    async fn spawn_fn_propagates_factory_errors() {
        let factory = SpawnFn::new(|| async { Err(SpawnError::new("service broker unavailable")) });
        let err = factory.spawn().await.unwrap_err();
        assert_eq!(err.to_string(), "service broker unavailable");
    }
}
