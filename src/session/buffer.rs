//! # In-memory session backed by a shared output buffer.
//!
//! [`BufferSession`] implements [`Session`] over an append-only string
//! buffer and a pair of flags. It serves two purposes:
//! - a test double for the controller (push output, flip terminal, count
//!   terminations) without spawning anything real;
//! - a carrier for embedded probes whose work happens inside the spawn
//!   future and whose result is just text (an HTTP body, a command's stdout).
//!
//! ## Rules
//! - Output is append-only; snapshots only grow.
//! - `finish()` and `terminate()` are idempotent; both mark the session
//!   terminal, and `terminate()` additionally records that it was killed.
//!
//! ## Example
//! ```rust
//! use probevisor::{BufferSession, Session};
//!
//! let session = BufferSession::new();
//! session.push("key ");
//! session.push("not present");
//! assert!(!session.is_terminal());
//!
//! session.finish();
//! assert!(session.is_terminal());
//! assert_eq!(session.output(), "key not present");
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::session::spawn::Session;

#[derive(Debug, Default)]
struct Inner {
    output: Mutex<String>,
    terminal: AtomicBool,
    killed: AtomicBool,
    terminations: AtomicUsize,
}

/// In-memory [`Session`] implementation.
///
/// Cheap to clone; all clones share the same buffer and flags, so a producer
/// can keep a clone to feed output while the controller owns the boxed
/// session.
#[derive(Clone, Debug, Default)]
pub struct BufferSession {
    inner: Arc<Inner>,
}

impl BufferSession {
    /// Creates an empty, still-running session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text to the observable output.
    ///
    /// Appends after termination are ignored; a killed attempt produces no
    /// further output.
    pub fn push(&self, text: &str) {
        if self.inner.killed.load(Ordering::Acquire) {
            return;
        }
        let mut out = self.inner.output.lock().unwrap_or_else(|e| e.into_inner());
        out.push_str(text);
    }

    /// Marks the session as completed normally.
    pub fn finish(&self) {
        self.inner.terminal.store(true, Ordering::Release);
    }

    /// Returns `true` if [`Session::terminate`] was ever called.
    pub fn was_terminated(&self) -> bool {
        self.inner.killed.load(Ordering::Acquire)
    }

    /// Returns how many times [`Session::terminate`] was called.
    pub fn terminations(&self) -> usize {
        self.inner.terminations.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Session for BufferSession {
    fn output(&self) -> String {
        self.inner
            .output
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn is_terminal(&self) -> bool {
        self.inner.terminal.load(Ordering::Acquire)
    }

    async fn terminate(&self) {
        self.inner.terminations.fetch_add(1, Ordering::AcqRel);
        self.inner.killed.store(true, Ordering::Release);
        self.inner.terminal.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_append_only() {
        let s = BufferSession::new();
        s.push("a");
        s.push("b");
        assert_eq!(s.output(), "ab");
    }

    #[tokio::test]
    async fn terminate_is_idempotent_and_counted() {
        let s = BufferSession::new();
        s.terminate().await;
        s.terminate().await;
        assert!(s.was_terminated());
        assert!(s.is_terminal());
        assert_eq!(s.terminations(), 2);
    }

    #[tokio::test]
    async fn no_output_after_termination() {
        let s = BufferSession::new();
        s.push("before");
        s.terminate().await;
        s.push("after");
        assert_eq!(s.output(), "before");
    }

    #[test]
    fn clones_share_state() {
        let s = BufferSession::new();
        let producer = s.clone();
        producer.push("shared");
        producer.finish();
        assert_eq!(s.output(), "shared");
        assert!(s.is_terminal());
    }
}
