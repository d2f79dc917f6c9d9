//! The escalation controller.
//!
//! Methods are invoked strictly sequentially in trust order; the first
//! one to return content becomes the raw candidate, subject to
//! validation. Methods are never run concurrently: most of them are
//! rate-limited or keyed external calls, and the common case succeeds at
//! the first method anyway.
//!
//! The attempt log is an explicit accumulator local to each run, so
//! concurrent runs for different videos stay independent.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::error::{ExtractionError, MethodResult, Result};
use crate::methods::{
    AiSearchMethod, CaptionLibraryMethod, CaptionsApiMethod, MetadataSynthesisMethod,
    PlayerResponseMethod, TimedTextMethod,
};
use crate::pipeline::normalize::{normalize, Normalized};
use crate::pipeline::validate::{validate, InvalidReason, Verdict};
use crate::traits::ai::Ai;
use crate::traits::credentials::CredentialStore;
use crate::traits::fetcher::Fetcher;
use crate::traits::library::CaptionLibrary;
use crate::traits::method::TranscriptMethod;
use crate::types::attempt::ExtractionAttempt;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent, Transcript};

/// A finished run: the validated transcript plus the attempt log.
#[derive(Debug)]
pub struct CascadeOutcome {
    /// The canonical record. `validated` is always true here.
    pub transcript: Transcript,

    /// One entry per method invocation, in the order they ran.
    pub attempts: Vec<ExtractionAttempt>,
}

/// Ordered fail-over over the extraction methods.
pub struct Cascade {
    methods: Vec<Box<dyn TranscriptMethod>>,
    config: CascadeConfig,
}

impl Cascade {
    /// Build a cascade over an explicit method list, kept in the given
    /// order.
    pub fn new(methods: Vec<Box<dyn TranscriptMethod>>, config: CascadeConfig) -> Self {
        Self { methods, config }
    }

    /// Wire the six standard methods in trust order.
    pub fn standard(
        fetcher: Arc<dyn Fetcher>,
        ai: Arc<dyn Ai>,
        library: Arc<dyn CaptionLibrary>,
        credentials: Arc<dyn CredentialStore>,
        config: CascadeConfig,
    ) -> Self {
        let methods: Vec<Box<dyn TranscriptMethod>> = vec![
            Box::new(PlayerResponseMethod::new(fetcher.clone(), &config)),
            Box::new(CaptionsApiMethod::new(
                fetcher.clone(),
                credentials,
                &config,
            )),
            Box::new(CaptionLibraryMethod::new(library)),
            Box::new(TimedTextMethod::new(fetcher.clone(), &config)),
            Box::new(AiSearchMethod::new(ai.clone(), &config)),
            Box::new(MetadataSynthesisMethod::new(fetcher, ai, &config)),
        ];
        Self::new(methods, config)
    }

    /// Run the full cascade for one video.
    ///
    /// Exactly one [`ExtractionError`] is produced when everything is
    /// exhausted; per-method failures are only logged and recorded on
    /// the attempt log.
    pub async fn run(&self, video: &VideoId) -> Result<CascadeOutcome> {
        let mut attempts = Vec::with_capacity(self.methods.len());
        let mut last_error: Option<String> = None;
        let mut candidate: Option<(MethodKind, RawContent)> = None;

        for method in &self.methods {
            match Self::invoke(method.as_ref(), video, &mut attempts).await {
                Ok(raw) => {
                    candidate = Some((method.kind(), raw));
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        video_id = %video,
                        method = %method.kind(),
                        error = %e,
                        "extraction method failed, escalating"
                    );
                    last_error = Some(e.to_string());
                }
            }
        }

        let Some((kind, raw)) = candidate else {
            return Err(ExtractionError::Failed {
                reason: last_error
                    .unwrap_or_else(|| "no extraction methods configured".to_string()),
            });
        };

        let normalized = normalize(raw);
        match validate(&normalized.canonical_text, self.config.min_transcript_chars) {
            Verdict::Valid => Ok(CascadeOutcome {
                transcript: Self::accept(kind, normalized),
                attempts,
            }),
            Verdict::Invalid(reason) => {
                tracing::warn!(
                    video_id = %video,
                    method = %kind,
                    reason = %reason,
                    "accepted candidate failed validation"
                );
                self.metadata_fallback(video, kind, reason, attempts).await
            }
        }
    }

    /// One more chance after a validation failure: the metadata method,
    /// unless it already produced the rejected candidate.
    async fn metadata_fallback(
        &self,
        video: &VideoId,
        rejected: MethodKind,
        reason: InvalidReason,
        mut attempts: Vec<ExtractionAttempt>,
    ) -> Result<CascadeOutcome> {
        let fallback = (rejected != MethodKind::MetadataSynthesis)
            .then(|| {
                self.methods
                    .iter()
                    .find(|m| m.kind() == MethodKind::MetadataSynthesis)
            })
            .flatten();

        let Some(fallback) = fallback else {
            return Err(ExtractionError::Failed {
                reason: reason.as_str().to_string(),
            });
        };

        tracing::info!(video_id = %video, "falling back to metadata synthesis after validation failure");

        match Self::invoke(fallback.as_ref(), video, &mut attempts).await {
            Ok(raw) => {
                let normalized = normalize(raw);
                match validate(&normalized.canonical_text, self.config.min_transcript_chars) {
                    Verdict::Valid => Ok(CascadeOutcome {
                        transcript: Self::accept(MethodKind::MetadataSynthesis, normalized),
                        attempts,
                    }),
                    Verdict::Invalid(second) => Err(ExtractionError::Failed {
                        reason: second.as_str().to_string(),
                    }),
                }
            }
            Err(e) => Err(ExtractionError::Failed {
                reason: e.to_string(),
            }),
        }
    }

    /// Invoke one method, recording its attempt.
    async fn invoke(
        method: &dyn TranscriptMethod,
        video: &VideoId,
        attempts: &mut Vec<ExtractionAttempt>,
    ) -> MethodResult<RawContent> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let outcome = method.attempt(video).await;

        attempts.push(ExtractionAttempt {
            method: method.kind(),
            succeeded: outcome.is_ok(),
            error: outcome.as_ref().err().map(|e| e.to_string()),
            duration: clock.elapsed(),
            started_at,
        });

        outcome
    }

    fn accept(kind: MethodKind, normalized: Normalized) -> Transcript {
        tracing::info!(
            method = %kind,
            confidence = kind.confidence(),
            chars = normalized.canonical_text.len(),
            segments = normalized.segments.len(),
            "transcript accepted"
        );

        Transcript {
            canonical_text: normalized.canonical_text,
            timestamped_text: normalized.timestamped_text,
            segments: normalized.segments,
            method: kind,
            confidence_score: kind.confidence(),
            validated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedMethod;
    use crate::types::transcript::TranscriptSegment;

    fn video() -> VideoId {
        VideoId::new("dQw4w9WgXcQ").unwrap()
    }

    fn long_segments() -> Vec<TranscriptSegment> {
        (0..20)
            .map(|i| {
                TranscriptSegment::new(i as f64 * 5.0, format!("segment number {i} with some words"))
            })
            .collect()
    }

    fn long_prose() -> String {
        "Generated summary sentence with enough substance to validate. ".repeat(5)
    }

    #[tokio::test]
    async fn test_kth_method_wins_after_k_minus_one_failures() {
        let cascade = Cascade::new(
            vec![
                Box::new(ScriptedMethod::failing(MethodKind::PlayerResponse, "down")),
                Box::new(ScriptedMethod::failing(MethodKind::CaptionsApi, "down")),
                Box::new(ScriptedMethod::succeeding(
                    MethodKind::CaptionLibrary,
                    RawContent::Timed(long_segments()),
                )),
                Box::new(ScriptedMethod::failing(MethodKind::TimedText, "unreached")),
            ],
            CascadeConfig::default(),
        );

        let outcome = cascade.run(&video()).await.unwrap();
        assert_eq!(outcome.transcript.method, MethodKind::CaptionLibrary);
        assert_eq!(outcome.transcript.confidence_score, 0.8);
        assert!(outcome.transcript.validated);
        assert_eq!(outcome.attempts.len(), 3);
        assert!(!outcome.attempts[0].succeeded);
        assert!(!outcome.attempts[1].succeeded);
        assert!(outcome.attempts[2].succeeded);
    }

    #[tokio::test]
    async fn test_all_methods_failing_surfaces_last_error() {
        let cascade = Cascade::new(
            vec![
                Box::new(ScriptedMethod::failing(MethodKind::PlayerResponse, "first down")),
                Box::new(ScriptedMethod::failing(MethodKind::TimedText, "last down")),
            ],
            CascadeConfig::default(),
        );

        let err = cascade.run(&video()).await.unwrap_err();
        match err {
            ExtractionError::Failed { reason } => assert!(reason.contains("last down")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_candidate_falls_back_to_metadata() {
        let cascade = Cascade::new(
            vec![
                // Succeeds, but with text far below the threshold.
                Box::new(ScriptedMethod::succeeding(
                    MethodKind::PlayerResponse,
                    RawContent::Timed(vec![TranscriptSegment::new(0.0, "too small")]),
                )),
                Box::new(ScriptedMethod::succeeding(
                    MethodKind::MetadataSynthesis,
                    RawContent::Prose(long_prose()),
                )),
            ],
            CascadeConfig::default(),
        );

        let outcome = cascade.run(&video()).await.unwrap();
        assert_eq!(outcome.transcript.method, MethodKind::MetadataSynthesis);
        assert_eq!(outcome.transcript.confidence_score, 0.5);
        assert_eq!(outcome.attempts.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_metadata_candidate_does_not_fall_back_to_itself() {
        let cascade = Cascade::new(
            vec![Box::new(ScriptedMethod::succeeding(
                MethodKind::MetadataSynthesis,
                RawContent::Prose("tiny".to_string()),
            ))],
            CascadeConfig::default(),
        );

        let err = cascade.run(&video()).await.unwrap_err();
        match err {
            ExtractionError::Failed { reason } => assert_eq!(reason, "too short"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_then_fallback_failure_is_one_error() {
        let cascade = Cascade::new(
            vec![
                Box::new(ScriptedMethod::failing(MethodKind::PlayerResponse, "down")),
                Box::new(ScriptedMethod::succeeding(
                    MethodKind::AiWebSearch,
                    RawContent::Prose("<html>error page body that is long enough to pass the length check but still markup</html>".to_string()),
                )),
                Box::new(ScriptedMethod::failing(
                    MethodKind::MetadataSynthesis,
                    "description too thin",
                )),
            ],
            CascadeConfig::default(),
        );

        let err = cascade.run(&video()).await.unwrap_err();
        match err {
            ExtractionError::Failed { reason } => {
                assert!(reason.contains("description too thin"))
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_method_list_fails_cleanly() {
        let cascade = Cascade::new(Vec::new(), CascadeConfig::default());
        assert!(cascade.run(&video()).await.is_err());
    }
}
