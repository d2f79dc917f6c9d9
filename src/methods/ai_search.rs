//! Web-search-backed AI reconstruction.
//!
//! Used when no structured caption source exists. The provider is told
//! to search, and the response is rejected unless it reports that search
//! actually ran; a model answering from memorized training data about a
//! video it has never seen is worse than failing to the next method.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{MethodError, MethodResult};
use crate::traits::ai::{Ai, AiRequest};
use crate::traits::method::TranscriptMethod;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

const SYSTEM_PROMPT: &str = "You reconstruct the spoken content of public videos for exam \
preparation. You must base every answer on web search results, never on memorized knowledge.";

/// Prose reconstruction through a search-capable language model.
pub struct AiSearchMethod {
    ai: Arc<dyn Ai>,
    min_content_chars: usize,
}

impl AiSearchMethod {
    /// Create the method over a language-model capability.
    pub fn new(ai: Arc<dyn Ai>, config: &CascadeConfig) -> Self {
        Self {
            ai,
            min_content_chars: config.min_search_content_chars,
        }
    }
}

#[async_trait]
impl TranscriptMethod for AiSearchMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::AiWebSearch
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        let request = AiRequest::new(
            SYSTEM_PROMPT,
            format!(
                "Search the web for the video at {} and reconstruct what is said in it as \
                 detailed prose. Cover every concrete fact, number, date and name the sources \
                 report. You MUST run a web search before answering; do not rely on prior \
                 knowledge.",
                video.watch_url()
            ),
        )
        .with_web_search(true)
        .with_max_tokens(4096)
        .with_temperature(0.2);

        let response = self.ai.complete(&request).await?;

        if !response.web_search_used {
            return Err(MethodError::NoContent(
                "provider answered without using web search".to_string(),
            ));
        }

        let content = response.content.trim();
        if content.len() < self.min_content_chars {
            return Err(MethodError::NoContent(format!(
                "web search produced only {} characters",
                content.len()
            )));
        }

        tracing::debug!(
            video_id = %video,
            chars = content.len(),
            tokens = response.tokens_used,
            "web search reconstruction accepted"
        );

        Ok(RawContent::Prose(content.to_string()))
    }
}
