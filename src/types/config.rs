//! Configuration for the extraction cascade.

use serde::{Deserialize, Serialize};

/// Tunables for the cascade and its methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Caption language the caller asked for.
    ///
    /// Used for track selection in the player-response method and as one
    /// entry in the timed-text language sweep. Default: "en".
    pub requested_language: String,

    /// Language most source videos are published in.
    ///
    /// Tried first by the timed-text sweep. Default: "hi".
    pub source_language: String,

    /// Minimum character count for a validated transcript.
    ///
    /// Kept deliberately low: over-eager validation previously rejected
    /// legitimate short-but-real content. Default: 100.
    pub min_transcript_chars: usize,

    /// Minimum content length accepted from the web-search method.
    ///
    /// Default: 200.
    pub min_search_content_chars: usize,

    /// Minimum metadata description length before synthesis is allowed.
    ///
    /// Below this the metadata method refuses rather than hallucinate
    /// from nothing. Default: 100.
    pub min_description_chars: usize,

    /// Base URL of the hosted captions API.
    pub captions_api_base_url: String,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            requested_language: "en".to_string(),
            source_language: "hi".to_string(),
            min_transcript_chars: 100,
            min_search_content_chars: 200,
            min_description_chars: 100,
            captions_api_base_url: "https://api.supadata.ai/v1".to_string(),
        }
    }
}

impl CascadeConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested caption language.
    pub fn with_requested_language(mut self, language: impl Into<String>) -> Self {
        self.requested_language = language.into();
        self
    }

    /// Set the expected source language.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    /// Set the validator's minimum transcript length.
    pub fn with_min_transcript_chars(mut self, chars: usize) -> Self {
        self.min_transcript_chars = chars;
        self
    }

    /// Set the captions API base URL.
    pub fn with_captions_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.captions_api_base_url = url.into();
        self
    }
}
