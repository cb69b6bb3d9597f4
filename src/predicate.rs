//! # Match predicates over session output.
//!
//! A [`MatchPredicate`] inspects the current output snapshot of a session and
//! decides whether it signals success. Predicates are deterministic and
//! stateless: only the text passed to [`evaluate`](MatchPredicate::evaluate)
//! matters, so one predicate value can be shared across many concurrent runs.
//!
//! Three forms are supported:
//! - [`MatchPredicate::contains`] — output contains a literal substring;
//! - [`MatchPredicate::matches`] — output matches a compiled regex
//!   (the form the smoke-test harness uses everywhere);
//! - [`MatchPredicate::custom`] — arbitrary caller-supplied function.
//!
//! ## Example
//! ```rust
//! use probevisor::{MatchOutcome, MatchPredicate};
//!
//! let p = MatchPredicate::contains("success");
//! assert_eq!(p.evaluate("still starting"), MatchOutcome::NotYet);
//! assert_eq!(p.evaluate(r#"{"status":"success"}"#), MatchOutcome::Matched);
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Verdict of a single predicate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The output signals success; the run can stop.
    Matched,
    /// No success signal yet; keep observing or retry.
    NotYet,
}

/// Predicate over a session's observed output.
///
/// Evaluation never owns or mutates the session; the controller hands it
/// output snapshots.
#[derive(Clone)]
pub enum MatchPredicate {
    /// Output contains the given literal substring.
    Contains(String),
    /// Output matches the given regex.
    Matches(Regex),
    /// Caller-supplied function over the output text.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl MatchPredicate {
    /// Predicate matching output that contains `needle` literally.
    pub fn contains(needle: impl Into<String>) -> Self {
        MatchPredicate::Contains(needle.into())
    }

    /// Predicate matching output against a regex pattern.
    ///
    /// Returns the underlying compile error for invalid patterns.
    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Ok(MatchPredicate::Matches(Regex::new(pattern)?))
    }

    /// Predicate backed by an arbitrary function.
    pub fn custom(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        MatchPredicate::Custom(Arc::new(f))
    }

    /// Evaluates the predicate against an output snapshot.
    pub fn evaluate(&self, output: &str) -> MatchOutcome {
        let matched = match self {
            MatchPredicate::Contains(needle) => output.contains(needle.as_str()),
            MatchPredicate::Matches(re) => re.is_match(output),
            MatchPredicate::Custom(f) => f(output),
        };
        if matched {
            MatchOutcome::Matched
        } else {
            MatchOutcome::NotYet
        }
    }
}

impl fmt::Debug for MatchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPredicate::Contains(needle) => f.debug_tuple("Contains").field(needle).finish(),
            MatchPredicate::Matches(re) => f.debug_tuple("Matches").field(&re.as_str()).finish(),
            MatchPredicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_matches_substring_anywhere() {
        let p = MatchPredicate::contains("key not present");
        assert_eq!(p.evaluate("200 OK: key not present\n"), MatchOutcome::Matched);
        assert_eq!(p.evaluate("200 OK"), MatchOutcome::NotYet);
        assert_eq!(p.evaluate(""), MatchOutcome::NotYet);
    }

    #[test]
    fn regex_matches_patterns() {
        let p = MatchPredicate::matches(r"HTTP/1\.[01] 2\d\d").unwrap();
        assert_eq!(p.evaluate("HTTP/1.1 200 OK"), MatchOutcome::Matched);
        assert_eq!(p.evaluate("HTTP/1.1 503 Unavailable"), MatchOutcome::NotYet);
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(MatchPredicate::matches("([unclosed").is_err());
    }

    #[test]
    fn custom_function_decides() {
        let p = MatchPredicate::custom(|out| out.lines().count() >= 3);
        assert_eq!(p.evaluate("a\nb"), MatchOutcome::NotYet);
        assert_eq!(p.evaluate("a\nb\nc"), MatchOutcome::Matched);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let p = MatchPredicate::contains("success");
        for _ in 0..10 {
            assert_eq!(p.evaluate("success"), MatchOutcome::Matched);
        }
    }
}
