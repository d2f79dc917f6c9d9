//! Shallow validation of accepted candidates.
//!
//! Catches obviously broken responses: empty bodies, truncated output,
//! and HTML error pages served with a 200 status. Deliberately nothing
//! deeper; over-eager validation previously rejected legitimate
//! short-but-real transcripts.

use std::fmt;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Empty or whitespace-only.
    Empty,

    /// Below the minimum character threshold.
    TooShort,

    /// Starts with a markup preamble; almost certainly an error page.
    ErrorPage,
}

impl InvalidReason {
    /// Stable human-readable reason for user-facing messaging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too short",
            Self::ErrorPage => "looks like an error page",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate may leave the core.
    Valid,

    /// The candidate is failure disguised as success.
    Invalid(InvalidReason),
}

impl Verdict {
    /// Whether the candidate passed.
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Inspect raw text for signals of failure disguised as success.
///
/// Rules are checked in order and short-circuit on the first failure.
pub fn validate(text: &str, min_chars: usize) -> Verdict {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Verdict::Invalid(InvalidReason::Empty);
    }

    if trimmed.len() < min_chars {
        return Verdict::Invalid(InvalidReason::TooShort);
    }

    let head = trimmed.chars().take(16).collect::<String>().to_lowercase();
    if head.starts_with("<html") || head.starts_with("<!doctype") || head.starts_with("<?xml") {
        return Verdict::Invalid(InvalidReason::ErrorPage);
    }

    Verdict::Valid
}
