//! Hosted third-party captioning API.
//!
//! Second in trust: a commercial provider that maintains its own caption
//! scraping. Keyed access; the key must be provisioned up front, and a
//! 429 is reported distinctly so operators can tell quota exhaustion
//! from provider breakage.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{MethodError, MethodResult};
use crate::traits::credentials::CredentialStore;
use crate::traits::fetcher::Fetcher;
use crate::traits::method::TranscriptMethod;
use crate::types::config::CascadeConfig;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent, TranscriptSegment};

/// Credential-store key for the captions API.
pub const CAPTIONS_API_KEY: &str = "CAPTIONS_API_KEY";

/// Provider response. Offsets arrive in seconds.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ApiCue>,
}

#[derive(Deserialize)]
struct ApiCue {
    #[serde(default)]
    offset: f64,
    #[serde(default)]
    text: String,
}

/// Captions via the hosted API.
pub struct CaptionsApiMethod {
    fetcher: Arc<dyn Fetcher>,
    credentials: Arc<dyn CredentialStore>,
    base_url: String,
    language: String,
}

impl CaptionsApiMethod {
    /// Create the method over a fetcher and credential store.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        credentials: Arc<dyn CredentialStore>,
        config: &CascadeConfig,
    ) -> Self {
        Self {
            fetcher,
            credentials,
            base_url: config.captions_api_base_url.clone(),
            language: config.requested_language.clone(),
        }
    }
}

#[async_trait]
impl TranscriptMethod for CaptionsApiMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::CaptionsApi
    }

    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent> {
        let key = self
            .credentials
            .get(CAPTIONS_API_KEY)
            .ok_or(MethodError::MissingCredential {
                name: CAPTIONS_API_KEY,
            })?;

        let url = format!(
            "{}/youtube/transcript?videoId={}&lang={}&text=false",
            self.base_url,
            video.as_str(),
            self.language,
        );

        let response = self
            .fetcher
            .get_text_with_headers(&url, &[("x-api-key", key.expose())])
            .await?;

        if response.status == 429 {
            tracing::warn!(
                video_id = %video,
                retry_after = ?response.retry_after,
                "captions API rate limited"
            );
            return Err(MethodError::RateLimited {
                retry_after: response.retry_after,
            });
        }
        if !response.is_success() {
            return Err(MethodError::Status {
                status: response.status,
            });
        }

        let parsed: ApiResponse = serde_json::from_str(&response.body).map_err(|e| {
            MethodError::Payload(format!("captions API returned malformed JSON: {e}"))
        })?;

        let segments: Vec<TranscriptSegment> = parsed
            .content
            .into_iter()
            .filter(|cue| !cue.text.trim().is_empty())
            .map(|cue| TranscriptSegment::new(cue.offset, cue.text))
            .collect();

        if segments.is_empty() {
            return Err(MethodError::Payload(
                "captions API returned no segments".to_string(),
            ));
        }

        Ok(RawContent::Timed(segments))
    }
}
