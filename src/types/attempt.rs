//! Per-method attempt records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::transcript::MethodKind;

/// One method invocation's outcome.
///
/// Created by the cascade for every method it invokes and never mutated
/// after creation. Retained only for logging and diagnostics; the
/// transcript itself carries the winning method and confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionAttempt {
    /// Which method was invoked.
    pub method: MethodKind,

    /// Whether the method returned content.
    pub succeeded: bool,

    /// The failure rendered as a message, when the method threw.
    pub error: Option<String>,

    /// Wall-clock time spent inside the method.
    pub duration: Duration,

    /// When the attempt started.
    pub started_at: DateTime<Utc>,
}
