//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the cascade
//! without making real network or AI calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::error::{AiError, AiResult, FetchError, FetchResult, MethodError, MethodResult};
use crate::traits::ai::{Ai, AiRequest, AiResponse};
use crate::traits::fetcher::{FetchedBody, Fetcher, PointerStore};
use crate::traits::library::{CaptionLibrary, LibraryCue};
use crate::traits::method::TranscriptMethod;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

/// A mock fetcher with scripted responses.
///
/// Routes are matched by URL substring, first match wins; an unmatched
/// URL is a transport error, which mimics a dead endpoint.
#[derive(Default)]
pub struct MockFetcher {
    routes: RwLock<Vec<(String, FetchedBody)>>,
}

impl MockFetcher {
    /// Create a fetcher with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a 200 response for URLs containing `url_part`.
    pub fn with_page(self, url_part: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url_part, FetchedBody::ok(body))
    }

    /// Script an arbitrary response for URLs containing `url_part`.
    pub fn with_response(self, url_part: impl Into<String>, response: FetchedBody) -> Self {
        self.routes
            .write()
            .unwrap()
            .push((url_part.into(), response));
        self
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get_text_with_headers(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
    ) -> FetchResult<FetchedBody> {
        self.routes
            .read()
            .unwrap()
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| FetchError::Transport(format!("no mock route for {url}").into()))
    }
}

/// A mock pointer store over a fixed map.
#[derive(Default)]
pub struct MockPointerStore {
    records: HashMap<String, String>,
}

impl MockPointerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stored record.
    pub fn with_record(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.records.insert(location.into(), content.into());
        self
    }
}

#[async_trait]
impl PointerStore for MockPointerStore {
    async fn read(&self, location: &str) -> FetchResult<String> {
        self.records
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::RecordUnavailable {
                location: location.to_string(),
            })
    }
}

/// A mock AI that replays a scripted queue of replies.
///
/// Every call pops the next reply and is recorded for assertions; an
/// exhausted queue is a provider error.
#[derive(Default)]
pub struct MockAi {
    replies: RwLock<VecDeque<std::result::Result<AiResponse, String>>>,
    calls: RwLock<Vec<AiRequest>>,
}

impl MockAi {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full response.
    pub fn with_reply(self, response: AiResponse) -> Self {
        self.replies.write().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a response that reports web search was used.
    pub fn with_search_reply(self, content: impl Into<String>) -> Self {
        self.with_reply(AiResponse {
            content: content.into(),
            tokens_used: 512,
            web_search_used: true,
        })
    }

    /// Queue a response without web search.
    pub fn with_plain_reply(self, content: impl Into<String>) -> Self {
        self.with_reply(AiResponse {
            content: content.into(),
            tokens_used: 256,
            web_search_used: false,
        })
    }

    /// Queue a provider failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(Err(message.into()));
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<AiRequest> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Ai for MockAi {
    async fn complete(&self, request: &AiRequest) -> AiResult<AiResponse> {
        self.calls.write().unwrap().push(request.clone());

        match self.replies.write().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(AiError::Provider(message)),
            None => Err(AiError::Provider("mock AI script exhausted".to_string())),
        }
    }
}

/// A mock caption library with fixed cues or a fixed failure.
#[derive(Default)]
pub struct MockCaptionLibrary {
    cues: Vec<LibraryCue>,
    failure: Option<String>,
}

impl MockCaptionLibrary {
    /// Create a library that returns no cues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the cues to return.
    pub fn with_cues(mut self, cues: Vec<LibraryCue>) -> Self {
        self.cues = cues;
        self
    }

    /// Script a failure instead.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl CaptionLibrary for MockCaptionLibrary {
    async fn cues(
        &self,
        _video_id: &str,
    ) -> std::result::Result<Vec<LibraryCue>, Box<dyn std::error::Error + Send + Sync>> {
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.cues.clone()),
        }
    }
}

/// A [`TranscriptMethod`] with a pre-programmed outcome, for cascade
/// tests that exercise ordering without any real method logic.
pub struct ScriptedMethod {
    kind: MethodKind,
    outcome: std::result::Result<RawContent, String>,
}

impl ScriptedMethod {
    /// A method that succeeds with the given raw content.
    pub fn succeeding(kind: MethodKind, raw: RawContent) -> Self {
        Self {
            kind,
            outcome: Ok(raw),
        }
    }

    /// A method that fails with the given message.
    pub fn failing(kind: MethodKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl TranscriptMethod for ScriptedMethod {
    fn kind(&self) -> MethodKind {
        self.kind
    }

    async fn attempt(&self, _video: &VideoId) -> MethodResult<RawContent> {
        match &self.outcome {
            Ok(raw) => Ok(raw.clone()),
            Err(message) => Err(MethodError::NoContent(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_routes_by_substring() {
        let fetcher = MockFetcher::new()
            .with_page("watch?v=", "page body")
            .with_response("timedtext", FetchedBody::ok("captions").with_status(404));

        let page = fetcher
            .get_text("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(page.body, "page body");

        let missing = fetcher.get_text("https://elsewhere.example/").await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_mock_ai_replays_in_order() {
        let ai = MockAi::new()
            .with_search_reply("first")
            .with_failure("provider down");

        let request = AiRequest::new("s", "u");
        assert_eq!(ai.complete(&request).await.unwrap().content, "first");
        assert!(ai.complete(&request).await.is_err());
        assert!(ai.complete(&request).await.is_err());
        assert_eq!(ai.calls().len(), 3);
    }
}
