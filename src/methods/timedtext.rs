//! Legacy timed-text endpoint, swept across language codes.
//!
//! The endpoint answers with an empty body (not an error status) for a
//! language a video has no track in, so per-code misses fall through to
//! the next code and only an exhausted list is a failure.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{MethodError, MethodResult};
use crate::methods::parse_json3;
use crate::traits::fetcher::Fetcher;
use crate::traits::method::TranscriptMethod;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Captions via the legacy lower-level endpoint.
pub struct TimedTextMethod {
    fetcher: Arc<dyn Fetcher>,
    language_codes: Vec<String>,
}

impl TimedTextMethod {
    /// Create the method with the standard code order: source language,
    /// English, the requested language, then the generic auto marker.
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CascadeConfig) -> Self {
        let candidates = [
            config.source_language.clone(),
            "en".to_string(),
            config.requested_language.clone(),
            "auto".to_string(),
        ];

        let mut language_codes: Vec<String> = Vec::with_capacity(candidates.len());
        for code in candidates {
            if !language_codes.contains(&code) {
                language_codes.push(code);
            }
        }

        Self {
            fetcher,
            language_codes,
        }
    }

    /// The code order this method will sweep.
    pub fn language_codes(&self) -> &[String] {
        &self.language_codes
    }
}

#[async_trait]
impl TranscriptMethod for TimedTextMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::TimedText
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        for code in &self.language_codes {
            let url = format!(
                "{}?v={}&lang={}&fmt=json3",
                TIMEDTEXT_URL,
                video.as_str(),
                code
            );

            let response = match self.fetcher.get_text(&url).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(video_id = %video, lang = %code, error = %e, "timedtext fetch failed, next code");
                    continue;
                }
            };

            if !response.is_success() || response.body.trim().is_empty() {
                continue;
            }

            // A non-json3 body or a payload with zero caption text both
            // mean "this code has nothing", not a hard failure.
            let Some(segments) = parse_json3(&response.body) else {
                continue;
            };
            if segments.is_empty() {
                continue;
            }

            tracing::debug!(video_id = %video, lang = %code, segments = segments.len(), "timedtext hit");
            return Ok(RawContent::Timed(segments));
        }

        Err(MethodError::NoContent(format!(
            "no timed text under any of {} language codes",
            self.language_codes.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    fn video() -> VideoId {
        VideoId::new("dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_code_order_and_dedup() {
        let config = CascadeConfig::default().with_requested_language("en");
        let method = TimedTextMethod::new(Arc::new(MockFetcher::new()), &config);
        assert_eq!(method.language_codes(), &["hi", "en", "auto"]);

        let config = CascadeConfig::default().with_requested_language("ta");
        let method = TimedTextMethod::new(Arc::new(MockFetcher::new()), &config);
        assert_eq!(method.language_codes(), &["hi", "en", "ta", "auto"]);
    }

    #[tokio::test]
    async fn test_falls_through_empty_and_non_json_codes() {
        let fetcher = MockFetcher::new()
            .with_page("lang=hi", "")
            .with_page("lang=en", "<transcript></transcript>")
            .with_page(
                "lang=auto",
                r#"{"events":[{"tStartMs":1000,"segs":[{"utf8":"found it"}]}]}"#,
            );
        let config = CascadeConfig::default().with_requested_language("en");
        let method = TimedTextMethod::new(Arc::new(fetcher), &config);

        match method.attempt(&video()).await.unwrap() {
            RawContent::Timed(segments) => assert_eq!(segments[0].text, "found it"),
            other => panic!("expected timed content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exhausted_codes_fail() {
        let fetcher = MockFetcher::new()
            .with_page("lang=hi", "")
            .with_page("lang=en", "")
            .with_page("lang=ta", "")
            .with_page("lang=auto", "");
        let config = CascadeConfig::default().with_requested_language("ta");
        let method = TimedTextMethod::new(Arc::new(fetcher), &config);

        let err = method.attempt(&video()).await.unwrap_err();
        assert!(matches!(err, MethodError::NoContent(_)));
    }

    #[tokio::test]
    async fn test_empty_segments_fall_through_not_fail() {
        // A payload that parses but has no caption text behaves like a
        // miss for that code, unlike the hard failure in earlier methods.
        let fetcher = MockFetcher::new()
            .with_page("lang=hi", r#"{"events":[]}"#)
            .with_page(
                "lang=en",
                r#"{"events":[{"tStartMs":0,"segs":[{"utf8":"ok"}]}]}"#,
            );
        let config = CascadeConfig::default().with_requested_language("en");
        let method = TimedTextMethod::new(Arc::new(fetcher), &config);

        assert!(method.attempt(&video()).await.is_ok());
    }
}
