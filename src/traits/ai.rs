//! Language-model capability.
//!
//! Implementations wrap specific LLM providers and handle the specifics
//! of request encoding and response parsing. The cascade only cares
//! about the content, the token spend, and whether the provider actually
//! consulted web search.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiResult;

/// One language-model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRequest {
    /// System prompt framing the task.
    pub system_prompt: String,

    /// The instruction itself.
    pub user_prompt: String,

    /// Allow the provider to consult web search.
    pub enable_web_search: bool,

    /// Demand the provider actually search rather than answer from
    /// memorized knowledge. Enforced by the caller via
    /// [`AiResponse::web_search_used`].
    pub force_web_search: bool,

    /// Completion token budget.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl AiRequest {
    /// Create a request with web search off and moderate defaults.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            enable_web_search: false,
            force_web_search: false,
            max_tokens: 2048,
            temperature: 0.3,
        }
    }

    /// Enable web search; `force` additionally demands the provider use it.
    pub fn with_web_search(mut self, force: bool) -> Self {
        self.enable_web_search = true;
        self.force_web_search = force;
        self
    }

    /// Set the completion token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// What the provider returned.
#[derive(Debug, Clone)]
pub struct AiResponse {
    /// Generated text.
    pub content: String,

    /// Total tokens billed for the call, when reported.
    pub tokens_used: u32,

    /// Whether the provider reports that it consulted web search.
    pub web_search_used: bool,
}

/// Language-model capability consumed by the AI-backed methods.
#[async_trait]
pub trait Ai: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: &AiRequest) -> AiResult<AiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = AiRequest::new("system", "user")
            .with_web_search(true)
            .with_max_tokens(4096)
            .with_temperature(0.2);

        assert!(request.enable_web_search);
        assert!(request.force_web_search);
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.temperature, 0.2);
    }

    #[test]
    fn test_web_search_off_by_default() {
        let request = AiRequest::new("system", "user");
        assert!(!request.enable_web_search);
        assert!(!request.force_web_search);
    }
}
