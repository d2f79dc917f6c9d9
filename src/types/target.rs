//! Canonical target identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a canonical video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// The canonical identifier of the single video processed in one run.
///
/// Immutable once resolved by the locator; every extraction method
/// consumes the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Create a video id, rejecting anything that is not 11 characters
    /// over the id alphabet.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::is_valid(&id).then_some(Self(id))
    }

    /// Whether a string is a well-formed video id.
    pub fn is_valid(id: &str) -> bool {
        id.len() == VIDEO_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch-page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_ids() {
        assert!(VideoId::new("dQw4w9WgXcQ").is_some());
        assert!(VideoId::new("abc-DEF_123").is_some());
    }

    #[test]
    fn test_rejects_bad_ids() {
        assert!(VideoId::new("short").is_none());
        assert!(VideoId::new("twelve-chars").is_none());
        assert!(VideoId::new("has a space").is_none());
        assert!(VideoId::new("").is_none());
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::new("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
