//! # Retry delay policies.
//!
//! - [`backoff`] — [`BackoffKind`] and [`BackoffPolicy`]: map an attempt
//!   index to the wait before the next attempt.
//! - [`jitter`] — [`JitterPolicy`]: optional randomization applied to the
//!   computed delay.

mod backoff;
mod jitter;

pub use backoff::{BackoffKind, BackoffPolicy};
pub use jitter::JitterPolicy;
