//! Core trait abstractions.
//!
//! The cascade consumes its collaborators as opaque capabilities:
//! HTTP fetch, stored-pointer reads, language-model calls, the bundled
//! caption library, and credential lookup. Concrete extraction methods
//! implement [`method::TranscriptMethod`].

pub mod ai;
pub mod credentials;
pub mod fetcher;
pub mod library;
pub mod method;

pub use ai::{Ai, AiRequest, AiResponse};
pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use fetcher::{FetchedBody, Fetcher, HttpFetcher, PointerStore};
pub use library::{CaptionLibrary, LibraryCue};
pub use method::TranscriptMethod;
