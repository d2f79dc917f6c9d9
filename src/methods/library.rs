//! Bundled caption library, third in trust order.
//!
//! The library reports cue offsets in milliseconds; canonical form is
//! seconds. Empty cues are stripped rather than carried as blank
//! segments.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{MethodError, MethodResult};
use crate::traits::library::CaptionLibrary;
use crate::traits::method::TranscriptMethod;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent, TranscriptSegment};

/// Captions via the locally bundled library.
pub struct CaptionLibraryMethod {
    library: Arc<dyn CaptionLibrary>,
}

impl CaptionLibraryMethod {
    /// Create the method over a library implementation.
    pub fn new(library: Arc<dyn CaptionLibrary>) -> Self {
        Self { library }
    }
}

#[async_trait]
impl TranscriptMethod for CaptionLibraryMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::CaptionLibrary
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        let cues = self
            .library
            .cues(video.as_str())
            .await
            .map_err(MethodError::Library)?;

        let cue_count = cues.len();
        let segments: Vec<TranscriptSegment> = cues
            .into_iter()
            .filter(|cue| !cue.text.trim().is_empty())
            .map(|cue| TranscriptSegment::new(cue.offset_ms as f64 / 1000.0, cue.text))
            .collect();

        tracing::debug!(
            video_id = %video,
            cues = cue_count,
            segments = segments.len(),
            "caption library returned cues"
        );

        if segments.is_empty() {
            return Err(MethodError::NoContent(
                "caption library returned no usable cues".to_string(),
            ));
        }

        Ok(RawContent::Timed(segments))
    }
}
