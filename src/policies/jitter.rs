//! # Jitter policy for retry delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays so that many runs
//! retrying against the same endpoint do not probe it in lockstep.
//!
//! - [`JitterPolicy::None`] — no randomization, predictable delays
//! - [`JitterPolicy::Full`] — random delay in [0, delay]
//! - [`JitterPolicy::Equal`] — delay/2 + random[0, delay/2]
//!
//! The default is [`JitterPolicy::None`]: a single smoke-test run usually
//! wants deterministic spacing, and the backoff monotonicity guarantees only
//! hold without jitter.

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the exact computed delay.
    #[default]
    None,

    /// Random delay in [0, delay]. Maximum load spreading.
    Full,

    /// delay/2 + random[0, delay/2]. Preserves at least half the delay.
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => {
                if delay.is_zero() {
                    return delay;
                }
                let mut rng = rand::thread_rng();
                Duration::from_secs_f64(rng.gen_range(0.0..=delay.as_secs_f64()))
            }
            JitterPolicy::Equal => {
                if delay.is_zero() {
                    return delay;
                }
                let half = delay.as_secs_f64() / 2.0;
                let mut rng = rand::thread_rng();
                Duration::from_secs_f64(half + rng.gen_range(0.0..=half))
            }
        }
    }
}
