//! Resource locator: raw input to canonical target.
//!
//! Input arrives as a pasted URL, a bare video id, a stored pointer to
//! one of those, or a short free-text organization query. The locator
//! either produces a [`VideoId`] for the cascade or a disambiguation
//! signal telling the caller to branch to the list-all-opportunities
//! workflow instead of single-video extraction.

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::error::{LocateError, LocateResult};
use crate::traits::fetcher::PointerStore;
use crate::types::target::VideoId;

/// Outcome of resolving raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// A single processable video.
    Video(VideoId),

    /// An ambiguous organization query. The caller should list all
    /// opportunities for the organization rather than extract one video.
    Organization(OrgQuery),
}

/// Normalized ambiguous-organization query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgQuery {
    /// The organization token that matched the allow-list, uppercased.
    pub name: String,
}

/// URL families a video reference may arrive in, tried in order.
const URL_FAMILIES: &[&str] = &[
    r"[?&]v=([A-Za-z0-9_-]{11})",
    r"youtu\.be/([A-Za-z0-9_-]{11})",
    r"/embed/([A-Za-z0-9_-]{11})",
    r"/shorts/([A-Za-z0-9_-]{11})",
    r"/live/([A-Za-z0-9_-]{11})",
    r"/v/([A-Za-z0-9_-]{11})",
];

fn url_matchers() -> &'static Vec<Regex> {
    static MATCHERS: OnceLock<Vec<Regex>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        URL_FAMILIES
            .iter()
            .map(|p| Regex::new(p).expect("url family pattern"))
            .collect()
    })
}

/// Allow-list of organizations whose bare names are ambiguous queries,
/// optionally followed by an exam/job word. Anything else free-text is
/// rejected rather than guessed at.
fn org_matcher() -> &'static Regex {
    static MATCHER: OnceLock<Regex> = OnceLock::new();
    MATCHER.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(ssc|upsc|ibps|rbi|rrb|ntpc|drdo|isro|sebi|railways?|bank(?:ing)?|police|army|navy|air\s*force)(?:\s+(?:exams?|jobs?|recruitments?|vacanc(?:y|ies)|notifications?))?\s*$",
        )
        .expect("organization allow-list pattern")
    })
}

/// Resolves raw input to a canonical target.
///
/// A pointer store is only needed when the app hands over stored
/// indirection records (a URL saved to object storage instead of pasted
/// inline).
#[derive(Default)]
pub struct Locator {
    pointer_store: Option<Arc<dyn PointerStore>>,
}

impl Locator {
    /// Create a locator that handles direct URLs and queries only.
    pub fn new() -> Self {
        Self {
            pointer_store: None,
        }
    }

    /// Create a locator that can also dereference stored pointers.
    pub fn with_pointer_store(store: Arc<dyn PointerStore>) -> Self {
        Self {
            pointer_store: Some(store),
        }
    }

    /// Resolve a raw URL or free-text query.
    ///
    /// The organization check runs first: a bare "SSC" must never be
    /// treated as a malformed video reference. Stored pointers are
    /// dereferenced exactly once, sanity-checked, and re-matched.
    pub async fn resolve(&self, input: &str) -> LocateResult<Located> {
        let input = input.trim();

        if let Some(org) = match_organization(input) {
            tracing::debug!(organization = %org.name, "input is an ambiguous organization query");
            return Ok(Located::Organization(org));
        }

        if let Some(id) = match_video_reference(input) {
            return Ok(Located::Video(id));
        }

        if is_stored_pointer(input) {
            return self.dereference(input).await.map(Located::Video);
        }

        Err(LocateError::NoMatch {
            input: input.to_string(),
        })
    }

    async fn dereference(&self, location: &str) -> LocateResult<VideoId> {
        let store = self.pointer_store.as_ref().ok_or_else(|| LocateError::BadPointer {
            reason: "no pointer store configured".to_string(),
        })?;

        let record = store
            .read(location)
            .await
            .map_err(|e| LocateError::BadPointer {
                reason: e.to_string(),
            })?;
        let record = record.trim();

        // Basic sanity check before re-matching: a stored record that
        // isn't even a video link is corrupt, not a new URL family.
        if !record.contains("youtube.com") && !record.contains("youtu.be") {
            return Err(LocateError::BadPointer {
                reason: "stored record is not a video link".to_string(),
            });
        }

        tracing::debug!(location = %location, "dereferenced stored pointer");

        match_video_reference(record).ok_or_else(|| LocateError::BadPointer {
            reason: "stored record has no extractable video id".to_string(),
        })
    }
}

/// Match the ambiguous-organization allow-list.
pub fn match_organization(input: &str) -> Option<OrgQuery> {
    org_matcher().captures(input).map(|captures| OrgQuery {
        name: captures[1].to_uppercase(),
    })
}

/// Match the ordered URL families, then a bare id. First match wins.
pub fn match_video_reference(input: &str) -> Option<VideoId> {
    for matcher in url_matchers() {
        if let Some(captures) = matcher.captures(input) {
            if let Some(id) = VideoId::new(&captures[1]) {
                return Some(id);
            }
        }
    }
    VideoId::new(input)
}

/// Whether the input names a stored indirection record rather than a
/// video directly.
fn is_stored_pointer(input: &str) -> bool {
    if input.contains("/storage/v1/object/") {
        return true;
    }
    url::Url::parse(input)
        .map(|parsed| parsed.scheme() == "storage")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPointerStore;

    #[tokio::test]
    async fn test_url_families() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/embed/aaaaaaaaaaa", "aaaaaaaaaaa"),
            ("https://www.youtube.com/shorts/bbbbbbbbbbb", "bbbbbbbbbbb"),
            ("https://www.youtube.com/live/ccccccccccc", "ccccccccccc"),
            ("https://www.youtube.com/v/ddddddddddd", "ddddddddddd"),
            ("https://m.youtube.com/watch?feature=share&v=eeeeeeeeeee", "eeeeeeeeeee"),
            ("dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ];

        let locator = Locator::new();
        for (input, expected) in cases {
            match locator.resolve(input).await.unwrap() {
                Located::Video(id) => assert_eq!(id.as_str(), expected, "for {input}"),
                other => panic!("expected video for {input}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_organization_queries_disambiguate() {
        let locator = Locator::new();
        for input in ["SSC", "upsc", " ibps ", "SSC exams", "railway jobs", "air force recruitment"] {
            match locator.resolve(input).await.unwrap() {
                Located::Organization(_) => {}
                other => panic!("expected organization for {input:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_organization_checked_before_url_matching() {
        // "SSC" is 3 chars and could never be a video id, but the branch
        // must be the organization one, not a NoMatch error.
        let locator = Locator::new();
        let located = locator.resolve("SSC").await.unwrap();
        assert_eq!(
            located,
            Located::Organization(OrgQuery {
                name: "SSC".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unmatched_input_fails() {
        let locator = Locator::new();
        let err = locator.resolve("how to crack any exam").await.unwrap_err();
        assert!(matches!(err, LocateError::NoMatch { .. }));
    }

    #[tokio::test]
    async fn test_pointer_dereference() {
        let store = MockPointerStore::new().with_record(
            "storage://links/abc.txt",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ\n",
        );
        let locator = Locator::with_pointer_store(Arc::new(store));

        let located = locator.resolve("storage://links/abc.txt").await.unwrap();
        match located {
            Located::Video(id) => assert_eq!(id.as_str(), "dQw4w9WgXcQ"),
            other => panic!("expected video, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pointer_to_nonsense_fails() {
        let store = MockPointerStore::new()
            .with_record("storage://links/bad.txt", "this file holds no link at all");
        let locator = Locator::with_pointer_store(Arc::new(store));

        let err = locator.resolve("storage://links/bad.txt").await.unwrap_err();
        assert!(matches!(err, LocateError::BadPointer { .. }));
    }

    #[tokio::test]
    async fn test_missing_pointer_record_fails() {
        let store = MockPointerStore::new();
        let locator = Locator::with_pointer_store(Arc::new(store));

        let err = locator.resolve("storage://links/gone.txt").await.unwrap_err();
        assert!(matches!(err, LocateError::BadPointer { .. }));
    }
}
