//! # Configuration for a retry run.
//!
//! [`RetryConfig`] bundles the timing and reporting knobs of one
//! [`RetrySession`](crate::RetrySession). It is a plain value: build it
//! explicitly (often from [`RetrySettings`](crate::RetrySettings)) and hand
//! it to the controller's constructor.
//!
//! ## Sentinel values
//! - `attempt_timeout = 0s` → per-attempt budget defaults to the overall timeout
//! - `max_attempts = 0` → unbounded (time-bounded only)

use std::time::Duration;

/// Configuration for a single retry controller.
///
/// ## Field semantics
/// - `overall_timeout`: hard deadline for the whole run
/// - `attempt_timeout`: time budget per attempt (`0s` = same as overall)
/// - `poll_interval`: spacing between output inspections (clamped to ≥ 1ms)
/// - `max_attempts`: attempt cap (`0` = unbounded)
/// - `fail_message`: surfaced verbatim when the run fails on time or attempts
/// - `probe`: optional label attached to published events
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Hard deadline for the whole run, measured from its start.
    ///
    /// No new attempt is spawned after this elapses, even mid-backoff.
    pub overall_timeout: Duration,

    /// Time budget for a single attempt.
    ///
    /// - `Duration::ZERO` = inherit the overall timeout
    /// - `> 0` = the attempt is terminated and retried after this long
    pub attempt_timeout: Duration,

    /// Spacing between successive output inspections of the live session.
    pub poll_interval: Duration,

    /// Maximum number of spawned attempts.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = the run fails after `n` attempts without a match
    pub max_attempts: u32,

    /// Caller-supplied failure message, surfaced verbatim on terminal failure.
    ///
    /// Typically names what was being checked, e.g.
    /// `{"FailReason": "Test app deployed but did not respond in time"}`.
    pub fail_message: String,

    /// Optional probe label attached to every published event.
    pub probe: Option<String>,

    /// Capacity of the event bus ring buffer.
    pub bus_capacity: usize,
}

impl RetryConfig {
    /// Creates a config with the given deadline and failure message;
    /// everything else keeps its default.
    pub fn new(overall_timeout: Duration, fail_message: impl Into<String>) -> Self {
        Self {
            overall_timeout,
            fail_message: fail_message.into(),
            ..Self::default()
        }
    }

    /// Sets the per-attempt time budget.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Sets the output poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the attempt cap (`0` = unbounded).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the probe label.
    pub fn with_probe(mut self, probe: impl Into<String>) -> Self {
        self.probe = Some(probe.into());
        self
    }

    /// Returns the effective per-attempt budget.
    ///
    /// - sentinel `0s` → the overall timeout
    #[inline]
    pub fn attempt_budget(&self) -> Duration {
        if self.attempt_timeout == Duration::ZERO {
            self.overall_timeout
        } else {
            self.attempt_timeout
        }
    }

    /// Returns the attempt cap as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` spawned attempts
    #[inline]
    pub fn attempt_limit(&self) -> Option<u32> {
        if self.max_attempts == 0 {
            None
        } else {
            Some(self.max_attempts)
        }
    }

    /// Returns a poll interval clamped to a minimum of 1ms.
    ///
    /// A zero interval would spin the observation loop.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for RetryConfig {
    /// Default configuration:
    ///
    /// - `overall_timeout = 30s`
    /// - `attempt_timeout = 0s` (inherit overall)
    /// - `poll_interval = 20ms`
    /// - `max_attempts = 0` (unbounded)
    /// - `fail_message = "retry run failed"`
    /// - `bus_capacity = 64`
    fn default() -> Self {
        Self {
            overall_timeout: Duration::from_secs(30),
            attempt_timeout: Duration::ZERO,
            poll_interval: Duration::from_millis(20),
            max_attempts: 0,
            fail_message: "retry run failed".to_string(),
            probe: None,
            bus_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempt_timeout_inherits_overall() {
        let cfg = RetryConfig::new(Duration::from_secs(10), "fail");
        assert_eq!(cfg.attempt_budget(), Duration::from_secs(10));

        let cfg = cfg.with_attempt_timeout(Duration::from_secs(2));
        assert_eq!(cfg.attempt_budget(), Duration::from_secs(2));
    }

    #[test]
    fn zero_max_attempts_means_unbounded() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.attempt_limit(), None);
        assert_eq!(cfg.with_max_attempts(5).attempt_limit(), Some(5));
    }

    #[test]
    fn poll_interval_never_zero() {
        let cfg = RetryConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(cfg.poll_interval_clamped(), Duration::from_millis(1));
    }
}
