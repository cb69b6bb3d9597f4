//! # Backoff policy for spacing retry attempts.
//!
//! [`BackoffPolicy`] controls how long the controller waits between attempts.
//! It is parameterized by:
//! - [`BackoffPolicy::kind`] the growth shape (none, linear, exponential);
//! - [`BackoffPolicy::baseline`] the unit delay;
//! - [`BackoffPolicy::max`] the maximum delay cap;
//! - [`BackoffPolicy::jitter`] optional randomization.
//!
//! The delay for attempt `n` (0-indexed) is derived purely from `n`:
//! - `None`: `baseline`, constant;
//! - `Linear`: `baseline × (n + 1)`;
//! - `Exponential`: `baseline × 2^n`.
//!
//! The result is clamped to `max`, then jitter is applied. Because the base
//! delay is a pure function of the attempt index, policies carry no mutable
//! state and may be shared across concurrent runs.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use probevisor::{BackoffKind, BackoffPolicy};
//!
//! let backoff = BackoffPolicy::new(BackoffKind::Linear, Duration::from_millis(100));
//!
//! assert_eq!(backoff.next(0), Duration::from_millis(100));
//! assert_eq!(backoff.next(1), Duration::from_millis(200));
//! assert_eq!(backoff.next(4), Duration::from_millis(500));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Growth shape of a backoff schedule.
///
/// Parsed from configuration strings via [`BackoffKind::parse`]; anything the
/// parser does not recognize resolves to [`BackoffKind::None`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackoffKind {
    /// Constant delay: every attempt waits exactly the baseline.
    #[default]
    None,
    /// Linear growth: attempt `n` waits `baseline × (n + 1)`.
    Linear,
    /// Geometric growth: attempt `n` waits `baseline × 2^n`.
    Exponential,
}

impl BackoffKind {
    /// Parses a configuration keyword into a kind.
    ///
    /// Matching is case-insensitive. Unrecognized keywords fall back to
    /// [`BackoffKind::None`], so a typo in a settings file degrades to a
    /// constant-interval schedule instead of an error.
    ///
    /// # Example
    /// ```
    /// use probevisor::BackoffKind;
    ///
    /// assert_eq!(BackoffKind::parse("Linear"), BackoffKind::Linear);
    /// assert_eq!(BackoffKind::parse("EXPONENTIAL"), BackoffKind::Exponential);
    /// assert_eq!(BackoffKind::parse("foo"), BackoffKind::None);
    /// ```
    pub fn parse(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "linear" => BackoffKind::Linear,
            "exponential" => BackoffKind::Exponential,
            _ => BackoffKind::None,
        }
    }
}

/// Retry backoff policy.
///
/// Maps an attempt index to the wait before the next attempt. Immutable and
/// `Copy`; share one value across as many runs as needed.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Growth shape.
    pub kind: BackoffKind,
    /// Unit delay the schedule is built from.
    pub baseline: Duration,
    /// Maximum delay cap for any attempt.
    pub max: Duration,
    /// Jitter applied to the clamped delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a constant schedule with:
    /// - `kind = None`;
    /// - `baseline = 100ms`;
    /// - `max = 30s`;
    /// - no jitter.
    fn default() -> Self {
        Self {
            kind: BackoffKind::None,
            baseline: Duration::from_millis(100),
            max: Duration::from_secs(30),
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Creates a policy with the given kind and baseline, default cap, no jitter.
    pub fn new(kind: BackoffKind, baseline: Duration) -> Self {
        Self {
            kind,
            baseline,
            ..Self::default()
        }
    }

    /// Replaces the delay cap.
    pub fn with_max(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    /// Replaces the jitter policy.
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Computes the delay for the given attempt number (0-indexed).
    ///
    /// The base delay follows [`BackoffPolicy::kind`], clamped to
    /// [`BackoffPolicy::max`]. All arithmetic saturates: huge attempt indices
    /// clamp to the cap rather than overflowing.
    ///
    /// Without jitter the result is monotonically non-decreasing in the
    /// attempt index for the linear and exponential kinds.
    pub fn next(&self, attempt: u32) -> Duration {
        let base = match self.kind {
            BackoffKind::None => self.baseline,
            BackoffKind::Linear => self.baseline.saturating_mul(attempt.saturating_add(1)),
            BackoffKind::Exponential => match 2u32.checked_pow(attempt) {
                Some(factor) => self.baseline.saturating_mul(factor),
                None => self.max,
            },
        };
        self.jitter.apply(base.min(self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(kind: BackoffKind, baseline_ms: u64) -> BackoffPolicy {
        BackoffPolicy::new(kind, Duration::from_millis(baseline_ms))
    }

    #[test]
    fn test_none_is_constant() {
        let p = policy(BackoffKind::None, 250);
        for attempt in 0..20 {
            assert_eq!(p.next(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn test_linear_grows_by_one_baseline_per_attempt() {
        let p = policy(BackoffKind::Linear, 100);
        for attempt in 0..10u32 {
            assert_eq!(
                p.next(attempt),
                Duration::from_millis(100 * (attempt as u64 + 1)),
                "attempt {} should wait baseline * (attempt + 1)",
                attempt
            );
        }
    }

    #[test]
    fn test_exponential_doubles_per_attempt() {
        let p = policy(BackoffKind::Exponential, 100);
        assert_eq!(p.next(0), Duration::from_millis(100));
        assert_eq!(p.next(1), Duration::from_millis(200));
        assert_eq!(p.next(2), Duration::from_millis(400));
        assert_eq!(p.next(3), Duration::from_millis(800));
    }

    #[test]
    fn test_exponential_differs_from_linear() {
        let lin = policy(BackoffKind::Linear, 100);
        let exp = policy(BackoffKind::Exponential, 100);
        assert!(exp.next(4) > lin.next(4));
    }

    #[test]
    fn test_clamped_to_max() {
        let p = policy(BackoffKind::Exponential, 100).with_max(Duration::from_secs(1));
        assert_eq!(p.next(10), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_attempt_saturates_to_max() {
        let p = policy(BackoffKind::Exponential, 100).with_max(Duration::from_secs(60));
        assert_eq!(p.next(u32::MAX), Duration::from_secs(60));

        let p = policy(BackoffKind::Linear, 100).with_max(Duration::from_secs(60));
        assert_eq!(p.next(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_monotonic_without_jitter() {
        for kind in [BackoffKind::Linear, BackoffKind::Exponential] {
            let p = policy(kind, 50);
            let mut prev = Duration::ZERO;
            for attempt in 0..64 {
                let d = p.next(attempt);
                assert!(d >= prev, "{kind:?} decreased at attempt {attempt}");
                prev = d;
            }
        }
    }

    #[test]
    fn test_baseline_exceeds_max() {
        let p = policy(BackoffKind::None, 10_000).with_max(Duration::from_secs(5));
        assert_eq!(p.next(0), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(BackoffKind::parse("linear"), BackoffKind::Linear);
        assert_eq!(BackoffKind::parse("LiNeAr"), BackoffKind::Linear);
        assert_eq!(BackoffKind::parse("exponential"), BackoffKind::Exponential);
        assert_eq!(BackoffKind::parse("none"), BackoffKind::None);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_none() {
        let unknown = BackoffPolicy::new(BackoffKind::parse("foo"), Duration::from_millis(100));
        let none = policy(BackoffKind::None, 100);
        for attempt in 0..10 {
            assert_eq!(unknown.next(attempt), none.next(attempt));
        }
    }

    #[test]
    fn test_full_jitter_bounded_by_base() {
        let p = policy(BackoffKind::None, 1000).with_jitter(JitterPolicy::Full);
        for _ in 0..50 {
            assert!(p.next(0) <= Duration::from_millis(1000));
        }
    }
}
