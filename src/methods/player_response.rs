//! Direct extraction from the watch page's embedded player data.
//!
//! The most trusted method: the page carries the player's own caption
//! track list, so a hit here is the video's actual captions. The payload
//! shape is undocumented and shifts between page revisions, so the track
//! list is located by three independent probes tried in order, each an
//! `Option` that short-circuits the rest on the first hit.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{MethodError, MethodResult};
use crate::methods::parse_json3;
use crate::traits::fetcher::Fetcher;
use crate::traits::method::TranscriptMethod;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

/// One caption track entry in the player data.
#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Caption extraction straight from the watch page.
pub struct PlayerResponseMethod {
    fetcher: Arc<dyn Fetcher>,
    requested_language: String,
}

impl PlayerResponseMethod {
    /// Create the method over a fetcher and the configured language.
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CascadeConfig) -> Self {
        Self {
            fetcher,
            requested_language: config.requested_language.clone(),
        }
    }
}

#[async_trait]
impl TranscriptMethod for PlayerResponseMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::PlayerResponse
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        let page = self.fetcher.get_text(&video.watch_url()).await?;
        if !page.is_success() {
            return Err(MethodError::Status {
                status: page.status,
            });
        }

        let player = extract_player_response(&page.body);
        if player.is_none() {
            tracing::debug!(video_id = %video, "no embedded player response, trying raw page search");
        }

        let tracks = player
            .as_ref()
            .and_then(probe_nested_tracks)
            .or_else(|| player.as_ref().and_then(probe_top_level_tracks))
            .or_else(|| probe_raw_page_tracks(&page.body));

        let tracks = match tracks {
            Some(tracks) => tracks,
            None if player.is_none() => {
                return Err(MethodError::Payload(
                    "no player response payload in watch page".to_string(),
                ))
            }
            None => {
                return Err(MethodError::Payload(
                    "no caption tracks in player response".to_string(),
                ))
            }
        };

        let track = select_track(&tracks, &self.requested_language);
        tracing::debug!(
            video_id = %video,
            language = %track.language_code,
            track_count = tracks.len(),
            "selected caption track"
        );

        let track_url = if track.base_url.contains("fmt=") {
            track.base_url.clone()
        } else {
            format!("{}&fmt=json3", track.base_url)
        };

        let payload = self.fetcher.get_text(&track_url).await?;
        if !payload.is_success() {
            return Err(MethodError::Status {
                status: payload.status,
            });
        }

        let segments = parse_json3(&payload.body)
            .filter(|segments| !segments.is_empty())
            .ok_or_else(|| {
                MethodError::Payload("no parseable caption segments in track payload".to_string())
            })?;

        Ok(RawContent::Timed(segments))
    }
}

/// Pull the `ytInitialPlayerResponse` object out of the page.
fn extract_player_response(page: &str) -> Option<serde_json::Value> {
    let start = page.find(PLAYER_RESPONSE_MARKER)? + PLAYER_RESPONSE_MARKER.len();
    let object = balanced_slice(&page[start..], b'{', b'}')?;
    serde_json::from_str(object).ok()
}

/// Primary probe: the documented-by-observation nested path.
fn probe_nested_tracks(player: &serde_json::Value) -> Option<Vec<CaptionTrack>> {
    let tracks = player
        .get("captions")?
        .get("playerCaptionsTracklistRenderer")?
        .get("captionTracks")?;
    deserialize_tracks(tracks)
}

/// Secondary probe: some page revisions hoist the renderer to the top.
fn probe_top_level_tracks(player: &serde_json::Value) -> Option<Vec<CaptionTrack>> {
    let tracks = player
        .get("playerCaptionsTracklistRenderer")?
        .get("captionTracks")?;
    deserialize_tracks(tracks)
}

/// Last probe: brute-force string search for the key in the raw page.
fn probe_raw_page_tracks(page: &str) -> Option<Vec<CaptionTrack>> {
    let start = page.find(CAPTION_TRACKS_MARKER)? + CAPTION_TRACKS_MARKER.len();
    let array = balanced_slice(page[start..].trim_start(), b'[', b']')?;
    let tracks: Vec<CaptionTrack> = serde_json::from_str(array).ok()?;
    (!tracks.is_empty()).then_some(tracks)
}

fn deserialize_tracks(value: &serde_json::Value) -> Option<Vec<CaptionTrack>> {
    let tracks: Vec<CaptionTrack> = serde_json::from_value(value.clone()).ok()?;
    (!tracks.is_empty()).then_some(tracks)
}

/// Take the balanced `open`…`close` prefix of `s`, honoring JSON string
/// literals and escapes.
fn balanced_slice(s: &str, open: u8, close: u8) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&open) {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        if b == b'"' {
            in_string = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(&s[..=i]);
            }
        }
    }

    None
}

/// Requested language, then any English track, then the first one.
fn select_track<'a>(tracks: &'a [CaptionTrack], requested: &str) -> &'a CaptionTrack {
    tracks
        .iter()
        .find(|t| t.language_code == requested)
        .or_else(|| tracks.iter().find(|t| t.language_code.starts_with("en")))
        .unwrap_or(&tracks[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(language: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://captions.example/{language}"),
            language_code: language.to_string(),
        }
    }

    #[test]
    fn test_balanced_slice_skips_braces_in_strings() {
        let s = r#"{"a":"}","b":{"c":1}} trailing"#;
        assert_eq!(balanced_slice(s, b'{', b'}'), Some(r#"{"a":"}","b":{"c":1}}"#));
    }

    #[test]
    fn test_balanced_slice_requires_opening_byte() {
        assert_eq!(balanced_slice("x{}", b'{', b'}'), None);
        assert_eq!(balanced_slice("{unterminated", b'{', b'}'), None);
    }

    #[test]
    fn test_extract_player_response() {
        let page = r#"<script>var ytInitialPlayerResponse = {"videoDetails":{"title":"t"}};</script>"#;
        let player = extract_player_response(page).unwrap();
        assert_eq!(player["videoDetails"]["title"], "t");
    }

    #[test]
    fn test_probe_order_prefers_nested_path() {
        let player = serde_json::json!({
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [{"baseUrl": "https://captions.example/nested", "languageCode": "en"}]
                }
            }
        });
        let tracks = probe_nested_tracks(&player).unwrap();
        assert_eq!(tracks[0].base_url, "https://captions.example/nested");
    }

    #[test]
    fn test_raw_page_probe() {
        let page = r#"...,"captionTracks":[{"baseUrl":"https://captions.example/raw","languageCode":"hi"}],"audioTracks":..."#;
        let tracks = probe_raw_page_tracks(page).unwrap();
        assert_eq!(tracks[0].language_code, "hi");
    }

    #[test]
    fn test_track_selection_order() {
        let tracks = vec![track("de"), track("en-GB"), track("hi")];
        assert_eq!(select_track(&tracks, "hi").language_code, "hi");
        assert_eq!(select_track(&tracks, "fr").language_code, "en-GB");

        let no_english = vec![track("de"), track("ta")];
        assert_eq!(select_track(&no_english, "fr").language_code, "de");
    }
}
