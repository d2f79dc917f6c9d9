//! Bundled captioning library capability.
//!
//! The third fallback wraps whatever captioning library the embedding
//! application links. It stays behind a trait for the same reason the
//! language model does: the cascade needs its cues, not its dependency
//! tree, and tests need to script it.

use async_trait::async_trait;

/// One cue as reported by the bundled library.
///
/// Libraries report offsets in milliseconds; the method converts to the
/// canonical seconds form.
#[derive(Debug, Clone)]
pub struct LibraryCue {
    /// Offset from the start of the video, in milliseconds.
    pub offset_ms: u64,

    /// Cue text. May be empty; empty cues are stripped downstream.
    pub text: String,
}

impl LibraryCue {
    /// Create a cue.
    pub fn new(offset_ms: u64, text: impl Into<String>) -> Self {
        Self {
            offset_ms,
            text: text.into(),
        }
    }
}

/// Capability wrapping a locally bundled captioning library.
#[async_trait]
pub trait CaptionLibrary: Send + Sync {
    /// Fetch all cues for a video.
    async fn cues(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<LibraryCue>, Box<dyn std::error::Error + Send + Sync>>;
}
