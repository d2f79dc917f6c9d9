//! Concrete extraction methods, one module per cascade position.
//!
//! Trust order: player response, captions API, bundled caption library,
//! timed-text endpoint, AI web search, metadata synthesis. The cascade
//! (`pipeline::cascade`) owns the ordering; each module only knows how
//! to attempt its own source.

pub mod ai_search;
pub mod captions_api;
pub mod library;
pub mod metadata;
pub mod player_response;
pub mod timedtext;

pub use ai_search::AiSearchMethod;
pub use captions_api::{CaptionsApiMethod, CAPTIONS_API_KEY};
pub use library::CaptionLibraryMethod;
pub use metadata::{MetadataSynthesisMethod, VideoMetadata, GENERATED_NOTICE};
pub use player_response::PlayerResponseMethod;
pub use timedtext::TimedTextMethod;

use serde::Deserialize;

use crate::types::transcript::TranscriptSegment;

/// The `fmt=json3` caption payload served by both the player-response
/// track URLs and the legacy timed-text endpoint.
#[derive(Deserialize)]
struct Json3Payload {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    t_start_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a `json3` caption payload into segments.
///
/// Returns `None` for a body that is not json3 at all; an empty vector
/// means the payload parsed but carried no caption text. Callers decide
/// which of those is fatal.
pub(crate) fn parse_json3(body: &str) -> Option<Vec<TranscriptSegment>> {
    let payload: Json3Payload = serde_json::from_str(body).ok()?;

    let segments = payload
        .events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>();
            let text = text.trim().replace('\n', " ");
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(
                event.t_start_ms as f64 / 1000.0,
                text,
            ))
        })
        .collect();

    Some(segments)
}
