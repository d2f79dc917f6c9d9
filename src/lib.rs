//! Multi-Strategy Video Transcript Extraction
//!
//! A deterministic escalation policy over heterogeneous, unreliable
//! transcript sources: an ordered cascade of extraction methods with
//! per-method failure recovery, shallow validation, one metadata-based
//! fallback, fixed confidence scoring and canonical normalization.
//!
//! # Design Philosophy
//!
//! - Methods are ordered by trust, not by speed: the common case
//!   succeeds at the first method, so nothing runs speculatively
//! - Failure of one method must never corrupt the next attempt
//! - A degraded answer is acceptable only when it is marked as degraded
//!   (method identity + confidence travel with every result)
//! - Collaborators are opaque capabilities behind traits; the cascade
//!   owns policy, the app owns infrastructure
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use transcription::{Cascade, CascadeConfig, HttpFetcher, Locator, Located};
//! use transcription::ai::HttpAi;
//!
//! let locator = Locator::new();
//! let located = locator.resolve("https://youtu.be/dQw4w9WgXcQ").await?;
//!
//! match located {
//!     Located::Video(video) => {
//!         let cascade = Cascade::standard(fetcher, ai, library, credentials, config);
//!         let outcome = cascade.run(&video).await?;
//!         println!("{} ({:.1})", outcome.transcript.method, outcome.transcript.confidence_score);
//!     }
//!     Located::Organization(org) => {
//!         // Branch to the list-all-opportunities workflow instead.
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability abstractions (Fetcher, Ai, CaptionLibrary, CredentialStore)
//! - [`types`] - Targets, segments, transcripts, attempt records, config
//! - [`locator`] - Raw input to canonical target or disambiguation signal
//! - [`methods`] - The six extraction methods in trust order
//! - [`pipeline`] - Cascade orchestration, validation, normalization
//! - [`ai`] - OpenAI-compatible provider implementation
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod locator;
pub mod methods;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AiError, ExtractionError, FetchError, LocateError, MethodError};
pub use locator::{Located, Locator, OrgQuery};
pub use traits::{
    ai::{Ai, AiRequest, AiResponse},
    credentials::{CredentialStore, EnvCredentials, StaticCredentials},
    fetcher::{FetchedBody, Fetcher, HttpFetcher, PointerStore},
    library::{CaptionLibrary, LibraryCue},
    method::TranscriptMethod,
};
pub use types::{
    attempt::ExtractionAttempt,
    config::CascadeConfig,
    target::{VideoId, VIDEO_ID_LEN},
    transcript::{MethodKind, RawContent, Transcript, TranscriptSegment},
};

// Re-export the pipeline surface
pub use pipeline::{
    cascade::{Cascade, CascadeOutcome},
    normalize::{format_timestamp, normalize, Normalized},
    validate::{validate, InvalidReason, Verdict},
};

// Re-export the standard methods
pub use methods::{
    AiSearchMethod, CaptionLibraryMethod, CaptionsApiMethod, MetadataSynthesisMethod,
    PlayerResponseMethod, TimedTextMethod, CAPTIONS_API_KEY, GENERATED_NOTICE,
};

// Re-export security primitives
pub use security::SecretString;
