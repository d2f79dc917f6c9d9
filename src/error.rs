//! Typed errors for the transcription library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The split mirrors how
//! failures travel through the cascade: capability errors (`FetchError`,
//! `AiError`) are wrapped into per-method failures (`MethodError`), which
//! the escalation controller recovers from locally; only
//! [`ExtractionError`] ever reaches the caller.

use thiserror::Error;

/// Errors resolving a raw input string to a processable target.
///
/// These are fatal for the request: an unresolvable target is surfaced
/// immediately and never retried.
#[derive(Debug, Error)]
pub enum LocateError {
    /// No URL family matched and the input is not a bare video id
    #[error("unrecognized video reference: {input}")]
    NoMatch { input: String },

    /// A stored pointer did not dereference to a usable video link
    #[error("stored pointer did not resolve to a video link: {reason}")]
    BadPointer { reason: String },
}

/// Errors from the HTTP fetch capability.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Stored indirection record missing or unreadable
    #[error("stored record unavailable: {location}")]
    RecordUnavailable { location: String },
}

/// Errors from the language-model capability.
#[derive(Debug, Error)]
pub enum AiError {
    /// Provider rejected the request or returned a failure payload
    #[error("AI provider error: {0}")]
    Provider(String),

    /// Transport failure talking to the provider
    #[error("AI transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned no usable content
    #[error("AI returned an empty response")]
    EmptyResponse,
}

/// A single extraction method's failure.
///
/// Recovered locally by the cascade: logged, recorded on the attempt,
/// and used to advance to the next method. Never surfaced to the caller
/// directly.
#[derive(Debug, Error)]
pub enum MethodError {
    /// HTTP fetch failed before a status was available
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Upstream returned a non-success status
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// Captions provider rate limit (HTTP 429)
    #[error("captions provider rate limited the request")]
    RateLimited {
        /// Seconds until the provider will accept requests again, when sent
        retry_after: Option<u64>,
    },

    /// Required credential absent from the store
    #[error("missing credential: {name}")]
    MissingCredential { name: &'static str },

    /// Expected structure absent from an upstream payload
    #[error("{0}")]
    Payload(String),

    /// The method ran but produced nothing usable
    #[error("{0}")]
    NoContent(String),

    /// Bundled caption library call failed
    #[error("caption library error: {0}")]
    Library(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Language-model call failed
    #[error("AI call failed: {0}")]
    Ai(#[from] AiError),
}

/// Terminal extraction errors, the only type callers see.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The input could not be resolved to a processable target
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] LocateError),

    /// Every method, and the metadata fallback after validation failure,
    /// was exhausted. The reason is the last validation-failure reason or
    /// the terminal method's error, suitable for user-facing messaging.
    #[error("extraction failed: {reason}")]
    Failed { reason: String },
}

/// Result type alias for cascade-level operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for a single method attempt.
pub type MethodResult<T> = std::result::Result<T, MethodError>;

/// Result type alias for the fetch capability.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for the language-model capability.
pub type AiResult<T> = std::result::Result<T, AiError>;

/// Result type alias for target resolution.
pub type LocateResult<T> = std::result::Result<T, LocateError>;
