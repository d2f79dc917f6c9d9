//! Metadata synthesis, the last resort.
//!
//! When no transcript-like content is obtainable at all, generate an
//! educational summary from the video's own title, description and tags.
//! The output is explicitly marked as generated. A description too thin
//! to summarize is refused outright: a model given three words of
//! metadata will invent the rest.

use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

use crate::error::{AiError, MethodError, MethodResult};
use crate::traits::ai::{Ai, AiRequest};
use crate::traits::fetcher::Fetcher;
use crate::traits::method::TranscriptMethod;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

/// Marker prefixed to generated summaries so downstream consumers can
/// never mistake one for a real transcript.
pub const GENERATED_NOTICE: &str =
    "[Generated from video metadata, not an actual transcript]";

const SYSTEM_PROMPT: &str = "You write factual study notes for Indian government exam \
aspirants. Work only from the metadata you are given; never invent specifics it does not \
contain.";

/// Title, description and tags scraped from the watch page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMetadata {
    /// Video title.
    pub title: String,

    /// Full description when the page embeds one, else the OpenGraph
    /// summary.
    pub description: String,

    /// Uploader-supplied tags.
    pub keywords: Vec<String>,
}

/// Substitute-summary generation from watch-page metadata.
pub struct MetadataSynthesisMethod {
    fetcher: Arc<dyn Fetcher>,
    ai: Arc<dyn Ai>,
    min_description_chars: usize,
}

impl MetadataSynthesisMethod {
    /// Create the method over a fetcher and a language-model capability.
    pub fn new(fetcher: Arc<dyn Fetcher>, ai: Arc<dyn Ai>, config: &CascadeConfig) -> Self {
        Self {
            fetcher,
            ai,
            min_description_chars: config.min_description_chars,
        }
    }
}

#[async_trait]
impl TranscriptMethod for MetadataSynthesisMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::MetadataSynthesis
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        let page = self.fetcher.get_text(&video.watch_url()).await?;
        if !page.is_success() {
            return Err(MethodError::Status {
                status: page.status,
            });
        }

        let metadata = scrape_metadata(&page.body);
        let description = metadata.description.trim();

        if description.len() < self.min_description_chars {
            return Err(MethodError::NoContent(format!(
                "metadata description too thin to summarize ({} of {} chars)",
                description.len(),
                self.min_description_chars
            )));
        }

        let mut prompt = format!(
            "Write an educational summary of this video using only its metadata.\n\n\
             Title: {}\nDescription: {}",
            metadata.title, description
        );
        if !metadata.keywords.is_empty() {
            prompt.push_str(&format!("\nTags: {}", metadata.keywords.join(", ")));
        }

        let request = AiRequest::new(SYSTEM_PROMPT, prompt)
            .with_max_tokens(2048)
            .with_temperature(0.4);

        let response = self.ai.complete(&request).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(MethodError::Ai(AiError::EmptyResponse));
        }

        tracing::info!(
            video_id = %video,
            title = %metadata.title,
            chars = content.len(),
            "generated substitute summary from metadata"
        );

        Ok(RawContent::Prose(format!(
            "{}\n\n{}",
            GENERATED_NOTICE, content
        )))
    }
}

/// Scrape title, description and tags from a watch page.
///
/// Prefers the full `shortDescription` embedded in the player JSON (the
/// OpenGraph description is truncated), falling back to meta tags.
pub fn scrape_metadata(page: &str) -> VideoMetadata {
    let title = extract_json_string(page, "title")
        .or_else(|| meta_content(page, "og:title"))
        .or_else(|| html_title(page))
        .unwrap_or_default();

    let description = extract_json_string(page, "shortDescription")
        .or_else(|| meta_content(page, "og:description"))
        .unwrap_or_default();

    let keywords = meta_contents(page, "og:video:tag");

    VideoMetadata {
        title,
        description,
        keywords,
    }
}

/// Extract a JSON string value by key from raw page text, honoring
/// escapes.
fn extract_json_string(page: &str, key: &str) -> Option<String> {
    let marker = format!("\"{}\":", key);
    let start = page.find(&marker)? + marker.len();
    let rest = page[start..].trim_start();
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => return serde_json::from_str(&rest[..=i]).ok(),
            _ => {}
        }
    }
    None
}

fn meta_content(page: &str, property: &str) -> Option<String> {
    let pattern = format!(
        r#"<meta[^>]*(?:property|name)="{}"[^>]*content="([^"]*)""#,
        regex::escape(property)
    );
    let matcher = Regex::new(&pattern).ok()?;
    matcher
        .captures(page)
        .map(|captures| captures[1].to_string())
        .filter(|content| !content.is_empty())
}

fn meta_contents(page: &str, property: &str) -> Vec<String> {
    let pattern = format!(
        r#"<meta[^>]*(?:property|name)="{}"[^>]*content="([^"]*)""#,
        regex::escape(property)
    );
    let Ok(matcher) = Regex::new(&pattern) else {
        return Vec::new();
    };
    matcher
        .captures_iter(page)
        .map(|captures| captures[1].to_string())
        .filter(|content| !content.is_empty())
        .collect()
}

fn html_title(page: &str) -> Option<String> {
    let matcher = Regex::new(r"<title>([^<]*)</title>").ok()?;
    matcher
        .captures(page)
        .map(|captures| captures[1].trim().to_string())
        .filter(|title| !title.is_empty())
}
