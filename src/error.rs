//! Error types used by the retry engine and its collaborators.
//!
//! This module defines three error enums:
//!
//! - [`RetryError`] — terminal failures reported by a retry run.
//! - [`SpawnError`] — failures raised by a session factory.
//! - [`ConfigError`] — failures while loading retry settings from disk.
//!
//! Transient conditions (a predicate that has not matched yet, a single
//! attempt timing out) never surface as errors; they are absorbed by the
//! controller and drive another attempt. Only the terminal kinds below
//! escape to the caller.

use std::time::Duration;
use thiserror::Error;

/// # Terminal failures of a retry run.
///
/// Returned by [`RetrySession::run_until_satisfied`](crate::RetrySession::run_until_satisfied)
/// when the run cannot produce a match. The embedded `message` is the
/// caller-supplied failure text from [`RetryConfig`](crate::RetryConfig),
/// suitable for direct surfacing to an operator or test reporter.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError {
    /// The overall deadline elapsed before any session's output matched.
    #[error("{message}")]
    DeadlineExceeded {
        /// Caller-supplied failure message.
        message: String,
        /// Time elapsed since the run started.
        elapsed: Duration,
    },

    /// The configured attempt cap was reached before any match.
    #[error("{message}")]
    AttemptsExhausted {
        /// Caller-supplied failure message.
        message: String,
        /// Number of attempts that were spawned.
        attempts: u32,
    },

    /// The session factory could not produce a session. Fatal, never retried.
    #[error("spawn failed (no retry): {error}")]
    Spawn {
        /// The underlying factory error message.
        error: String,
    },

    /// The run was abandoned via its cancellation token.
    #[error("run cancelled")]
    Canceled,
}

impl RetryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use probevisor::RetryError;
    ///
    /// let err = RetryError::DeadlineExceeded {
    ///     message: "app did not respond".into(),
    ///     elapsed: Duration::from_secs(30),
    /// };
    /// assert_eq!(err.as_label(), "retry_deadline_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::DeadlineExceeded { .. } => "retry_deadline_exceeded",
            RetryError::AttemptsExhausted { .. } => "retry_attempts_exhausted",
            RetryError::Spawn { .. } => "retry_spawn_failed",
            RetryError::Canceled => "retry_canceled",
        }
    }

    /// Returns a human-readable message with details about the failure.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::DeadlineExceeded { message, elapsed } => {
                format!("deadline exceeded after {elapsed:?}: {message}")
            }
            RetryError::AttemptsExhausted { message, attempts } => {
                format!("gave up after {attempts} attempts: {message}")
            }
            RetryError::Spawn { error } => format!("spawn failed: {error}"),
            RetryError::Canceled => "run cancelled".to_string(),
        }
    }
}

/// # Failure raised by a session factory.
///
/// Produced by [`Spawn::spawn`](crate::Spawn::spawn) when the factory cannot
/// start an attempt (underlying resource unavailable, binary missing, and so
/// on). Always fatal to the run: the controller reports it immediately as
/// [`RetryError::Spawn`] without scheduling another attempt.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SpawnError(pub String);

impl SpawnError {
    /// Creates a spawn error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

/// # Failures while loading retry settings.
///
/// Raised by [`RetrySettings::from_path`](crate::RetrySettings::from_path)
/// and [`RetrySettings::from_reader`](crate::RetrySettings::from_reader).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON or is missing required fields.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
