//! # Checkable sessions: one externally observable attempt.
//!
//! A [`Session`] is a single in-flight attempt (an HTTP probe, a subprocess)
//! whose output can be polled while it runs. A [`Spawn`] factory produces a
//! fresh session per attempt; [`SpawnFn`] wraps a plain closure into one.
//! [`BufferSession`] is an in-memory implementation for tests and embedded
//! probes.

mod buffer;
mod spawn;

pub use buffer::BufferSession;
pub use spawn::{Session, SessionRef, Spawn, SpawnFn};
