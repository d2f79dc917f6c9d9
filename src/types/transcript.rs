//! Transcript value types: segments, raw method output, and the
//! canonical extraction record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One time-aligned caption unit.
///
/// Segments are ordered by `start_seconds` ascending; offsets are
/// monotonically non-decreasing within one extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds. Non-negative.
    pub start_seconds: f64,

    /// Caption text for this unit.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment, clamping negative offsets to zero.
    pub fn new(start_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds: start_seconds.max(0.0),
            text: text.into(),
        }
    }
}

/// Raw output of a single extraction method, before normalization.
#[derive(Debug, Clone)]
pub enum RawContent {
    /// Time-aligned caption segments.
    Timed(Vec<TranscriptSegment>),

    /// Free-form prose with no timing information.
    Prose(String),
}

/// The closed set of extraction methods, in trust order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Caption track lifted from the watch page's embedded player data.
    PlayerResponse,

    /// Hosted third-party captioning API.
    CaptionsApi,

    /// Locally bundled captioning library.
    CaptionLibrary,

    /// Legacy timed-text endpoint, swept across language codes.
    TimedText,

    /// Web-search-backed AI reconstruction. Prose only.
    AiWebSearch,

    /// Educational summary generated from video metadata. Explicitly not
    /// a real transcript.
    MetadataSynthesis,
}

impl MethodKind {
    /// Fixed trust score for results produced by this method.
    ///
    /// Strictly decreasing down the trust order; metadata synthesis is
    /// the floor at 0.5.
    pub fn confidence(self) -> f32 {
        match self {
            Self::PlayerResponse => 1.0,
            Self::CaptionsApi => 0.9,
            Self::CaptionLibrary => 0.8,
            Self::TimedText => 0.7,
            Self::AiWebSearch => 0.6,
            Self::MetadataSynthesis => 0.5,
        }
    }

    /// Stable identifier used in logs and stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlayerResponse => "player_response",
            Self::CaptionsApi => "captions_api",
            Self::CaptionLibrary => "caption_library",
            Self::TimedText => "timed_text",
            Self::AiWebSearch => "ai_web_search",
            Self::MetadataSynthesis => "metadata_synthesis",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical extraction record handed to downstream summarization.
///
/// Constructed once per successful cascade run and never mutated.
/// Anything the cascade returns has `validated == true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Plain transcript text with no timing markers.
    pub canonical_text: String,

    /// One `[M:SS] text` line per segment; equals `canonical_text` when
    /// no timing is available.
    pub timestamped_text: String,

    /// Time-aligned segments. Empty for prose-only methods.
    pub segments: Vec<TranscriptSegment>,

    /// Which method produced this record.
    pub method: MethodKind,

    /// Fixed per-method trust score in (0, 1].
    pub confidence_score: f32,

    /// Whether the validator accepted the text.
    pub validated: bool,
}

impl Transcript {
    /// Number of whitespace-separated words in the canonical text.
    pub fn word_count(&self) -> usize {
        self.canonical_text.split_whitespace().count()
    }

    /// Estimated reading time at 200 words per minute, rounded up.
    pub fn reading_time_minutes(&self) -> usize {
        self.word_count().div_ceil(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_strictly_decreases_in_trust_order() {
        let order = [
            MethodKind::PlayerResponse,
            MethodKind::CaptionsApi,
            MethodKind::CaptionLibrary,
            MethodKind::TimedText,
            MethodKind::AiWebSearch,
            MethodKind::MetadataSynthesis,
        ];
        for pair in order.windows(2) {
            assert!(
                pair[0].confidence() > pair[1].confidence(),
                "{} must outrank {}",
                pair[0],
                pair[1]
            );
        }
        assert!(MethodKind::MetadataSynthesis.confidence() <= 0.5);
    }

    #[test]
    fn test_segment_clamps_negative_offset() {
        let segment = TranscriptSegment::new(-3.0, "hello");
        assert_eq!(segment.start_seconds, 0.0);
    }

    #[test]
    fn test_word_count_and_reading_time() {
        let transcript = Transcript {
            canonical_text: vec!["word"; 401].join(" "),
            timestamped_text: String::new(),
            segments: vec![],
            method: MethodKind::PlayerResponse,
            confidence_score: 1.0,
            validated: true,
        };
        assert_eq!(transcript.word_count(), 401);
        assert_eq!(transcript.reading_time_minutes(), 3);
    }
}
