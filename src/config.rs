//! # Retry settings loaded from a harness configuration file.
//!
//! The smoke-test harness carries a `retry` block in its JSON configuration:
//!
//! ```json
//! {
//!   "baseline_interval_milliseconds": 200,
//!   "max_attempts": 10,
//!   "backoff": "linear"
//! }
//! ```
//!
//! [`RetrySettings`] is the serde model of that block. Settings are plain
//! values: load them explicitly with [`RetrySettings::from_path`] and hand
//! the derived [`BackoffPolicy`] to the controller. There is no process-wide
//! configuration object.
//!
//! ## Rules
//! - The `backoff` keyword is matched case-insensitively; unrecognized
//!   keywords resolve to the constant-interval policy.
//! - `max_attempts = 0` means unbounded (the run is bounded by time only).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::policies::{BackoffKind, BackoffPolicy};

/// Retry block of the harness configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// Baseline retry interval in milliseconds.
    #[serde(rename = "baseline_interval_milliseconds")]
    pub baseline_ms: u64,

    /// Attempt cap; `0` means unbounded.
    #[serde(default)]
    pub max_attempts: u32,

    /// Backoff keyword: `"none"`, `"linear"`, or `"exponential"`.
    #[serde(default)]
    pub backoff: String,
}

impl RetrySettings {
    /// Loads settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads settings from any JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns the baseline interval as a [`Duration`].
    pub fn baseline(&self) -> Duration {
        Duration::from_millis(self.baseline_ms)
    }

    /// Returns the attempt cap as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` spawned attempts per run
    pub fn attempt_limit(&self) -> Option<u32> {
        if self.max_attempts == 0 {
            None
        } else {
            Some(self.max_attempts)
        }
    }

    /// Builds the backoff policy described by these settings.
    ///
    /// The keyword goes through [`BackoffKind::parse`], so `"Exponential"`
    /// and `"exponential"` are equivalent and `"foo"` degrades to the
    /// constant-interval policy.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(BackoffKind::parse(&self.backoff), self.baseline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_harness_retry_block() {
        let json = r#"{
            "baseline_interval_milliseconds": 200,
            "max_attempts": 10,
            "backoff": "linear"
        }"#;
        let settings = RetrySettings::from_reader(json.as_bytes()).unwrap();
        assert_eq!(settings.baseline(), Duration::from_millis(200));
        assert_eq!(settings.attempt_limit(), Some(10));
        assert_eq!(settings.backoff_policy().kind, BackoffKind::Linear);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{ "baseline_interval_milliseconds": 50 }"#;
        let settings = RetrySettings::from_reader(json.as_bytes()).unwrap();
        assert_eq!(settings.attempt_limit(), None);
        assert_eq!(settings.backoff_policy().kind, BackoffKind::None);
    }

    #[test]
    fn unknown_backoff_keyword_degrades_to_none() {
        let json = r#"{
            "baseline_interval_milliseconds": 100,
            "backoff": "foo"
        }"#;
        let settings = RetrySettings::from_reader(json.as_bytes()).unwrap();
        let policy = settings.backoff_policy();
        for attempt in 0..5 {
            assert_eq!(policy.next(attempt), Duration::from_millis(100));
        }
    }

    #[test]
    fn keyword_is_case_insensitive() {
        let json = r#"{
            "baseline_interval_milliseconds": 100,
            "backoff": "EXPONENTIAL"
        }"#;
        let settings = RetrySettings::from_reader(json.as_bytes()).unwrap();
        assert_eq!(settings.backoff_policy().kind, BackoffKind::Exponential);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = RetrySettings::from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "baseline_interval_milliseconds": 25, "max_attempts": 3, "backoff": "none" }}"#
        )
        .unwrap();
        let settings = RetrySettings::from_path(file.path()).unwrap();
        assert_eq!(settings.baseline(), Duration::from_millis(25));
        assert_eq!(settings.attempt_limit(), Some(3));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RetrySettings::from_path("/nonexistent/retry.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
