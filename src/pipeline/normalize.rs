//! Normalization of heterogeneous raw method output.
//!
//! Segment-bearing methods and prose-only methods converge here into
//! the canonical triple: plain text, timestamped text, and the segment
//! list itself.

use crate::types::transcript::{RawContent, TranscriptSegment};

/// Canonical representation produced from raw method output.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Segment texts joined with single spaces, or the prose itself.
    pub canonical_text: String,

    /// One `[M:SS] text` line per segment; equals `canonical_text` for
    /// prose.
    pub timestamped_text: String,

    /// The segments, untouched. Empty for prose.
    pub segments: Vec<TranscriptSegment>,
}

/// Convert raw method output into the canonical representation.
pub fn normalize(raw: RawContent) -> Normalized {
    match raw {
        RawContent::Timed(segments) => {
            let canonical_text = segments
                .iter()
                .map(|segment| segment.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            let timestamped_text = segments
                .iter()
                .map(|segment| {
                    format!(
                        "[{}] {}",
                        format_timestamp(segment.start_seconds),
                        segment.text
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");

            Normalized {
                canonical_text,
                timestamped_text,
                segments,
            }
        }
        RawContent::Prose(text) => {
            let text = text.trim().to_string();
            Normalized {
                canonical_text: text.clone(),
                timestamped_text: text,
                segments: Vec::new(),
            }
        }
    }
}

/// Render a second offset as `M:SS`, or `H:MM:SS` past the first hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, "welcome back"),
            TranscriptSegment::new(65.0, "today we cover the notification"),
            TranscriptSegment::new(3725.0, "that wraps it up"),
        ]
    }

    #[test]
    fn test_timestamp_rendering() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.0), "1:05");
        assert_eq!(format_timestamp(600.0), "10:00");
        assert_eq!(format_timestamp(3725.0), "1:02:05");
        assert_eq!(format_timestamp(-5.0), "0:00");
    }

    #[test]
    fn test_timed_normalization() {
        let normalized = normalize(RawContent::Timed(segments()));

        assert_eq!(
            normalized.canonical_text,
            "welcome back today we cover the notification that wraps it up"
        );
        assert_eq!(
            normalized.timestamped_text,
            "[0:00] welcome back\n[1:05] today we cover the notification\n[1:02:05] that wraps it up"
        );
        assert_eq!(normalized.segments.len(), 3);
    }

    #[test]
    fn test_prose_normalization() {
        let normalized = normalize(RawContent::Prose("  some prose  ".to_string()));

        assert_eq!(normalized.canonical_text, "some prose");
        assert_eq!(normalized.timestamped_text, normalized.canonical_text);
        assert!(normalized.segments.is_empty());
    }

    #[test]
    fn test_round_trip_reconstructs_segment_count() {
        let normalized = normalize(RawContent::Timed(segments()));
        let lines: Vec<&str> = normalized.timestamped_text.lines().collect();
        assert_eq!(lines.len(), normalized.segments.len());

        // Re-normalizing the already-canonical segments is a fixpoint.
        let again = normalize(RawContent::Timed(normalized.segments.clone()));
        assert_eq!(again, normalized);
    }

    proptest! {
        #[test]
        fn prop_line_count_matches_segment_count(
            offsets in proptest::collection::vec(0.0f64..86_400.0, 1..40)
        ) {
            let mut sorted = offsets.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let segments: Vec<TranscriptSegment> = sorted
                .iter()
                .enumerate()
                .map(|(i, &offset)| TranscriptSegment::new(offset, format!("segment {i}")))
                .collect();

            let normalized = normalize(RawContent::Timed(segments.clone()));
            prop_assert_eq!(normalized.timestamped_text.lines().count(), segments.len());

            let again = normalize(RawContent::Timed(normalized.segments.clone()));
            prop_assert_eq!(again.segments.len(), segments.len());
        }
    }
}
