//! Fetch capabilities: remote HTTP content and stored indirection
//! records.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{FetchError, FetchResult};

/// A fetched HTTP body with the response details the methods care about.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// HTTP status code.
    pub status: u16,

    /// Response body decoded as text.
    pub body: String,

    /// `Retry-After` header in seconds, when the server sent one.
    pub retry_after: Option<u64>,
}

impl FetchedBody {
    /// A successful (200) body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            retry_after: None,
        }
    }

    /// Override the status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the retry-after hint.
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to fetch remote text content over HTTP.
///
/// Implementations must be safe to call from independent runs; methods
/// share a fetcher only through `Arc` and never through mutable state.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a URL with additional request headers (API-keyed endpoints).
    async fn get_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> FetchResult<FetchedBody>;

    /// GET a URL and return the decoded body plus status.
    async fn get_text(&self, url: &str) -> FetchResult<FetchedBody> {
        self.get_text_with_headers(url, &[]).await
    }
}

/// Capability to read a previously stored indirection record.
///
/// The locator dereferences stored pointers exactly once through this
/// trait; it never follows a pointer found inside a pointer.
#[async_trait]
pub trait PointerStore: Send + Sync {
    /// Read the stored record at `location` as text.
    async fn read(&self, location: &str) -> FetchResult<String>;
}

/// Production [`Fetcher`] backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a 30-second request timeout and a
    /// browser-like user agent (caption endpoints reject obvious bots).
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
            )
            .build()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Use a pre-built client instead of the default one.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> FetchResult<FetchedBody> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        Ok(FetchedBody {
            status,
            body,
            retry_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_body_builder() {
        let body = FetchedBody::ok("hello").with_status(429).with_retry_after(30);
        assert_eq!(body.status, 429);
        assert_eq!(body.retry_after, Some(30));
        assert!(!body.is_success());
    }

    #[test]
    fn test_success_range() {
        assert!(FetchedBody::ok("x").is_success());
        assert!(FetchedBody::ok("x").with_status(204).is_success());
        assert!(!FetchedBody::ok("x").with_status(301).is_success());
        assert!(!FetchedBody::ok("x").with_status(500).is_success());
    }
}
