//! HTTP implementation of the [`Ai`] capability.
//!
//! Speaks the OpenAI-compatible chat-completions dialect, including the
//! `web_search_options` extension exposed by search-capable models.
//! Search usage is detected from URL-citation annotations on the
//! response message; providers only attach those when a search ran.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AiError, AiResult};
use crate::security::SecretString;
use crate::traits::ai::{Ai, AiRequest, AiResponse};

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<WebSearchOptions>,
}

#[derive(Serialize)]
struct WebSearchOptions {
    search_context_size: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Deserialize)]
struct Annotation {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI-compatible chat-completions client.
pub struct HttpAi {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl HttpAi {
    /// Create a client with the given API key and a search-capable
    /// default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: SecretString::new(api_key),
            model: "gpt-4o-search-preview".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AiError::Provider("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (proxies, compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Ai for HttpAi {
    async fn complete(&self, request: &AiRequest) -> AiResult<AiResponse> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            web_search_options: request.enable_web_search.then(|| WebSearchOptions {
                search_context_size: "medium".to_string(),
            }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Transport(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Provider(format!("{status}: {text}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::Transport(Box::new(e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(AiError::EmptyResponse)?;

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        let web_search_used = choice
            .message
            .annotations
            .iter()
            .any(|annotation| annotation.kind == "url_citation");

        Ok(AiResponse {
            content,
            tokens_used: parsed.usage.map(|usage| usage.total_tokens).unwrap_or(0),
            web_search_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let ai = HttpAi::new("sk-test")
            .with_model("gpt-4o-mini-search-preview")
            .with_base_url("https://proxy.internal/v1");
        assert_eq!(ai.model(), "gpt-4o-mini-search-preview");
    }

    #[test]
    fn test_search_annotation_detection() {
        let raw = r#"{
            "choices": [{"message": {
                "content": "found it",
                "annotations": [{"type": "url_citation", "url_citation": {"url": "https://example.com"}}]
            }}],
            "usage": {"total_tokens": 321}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let choice = &parsed.choices[0];
        assert!(choice.message.annotations.iter().any(|a| a.kind == "url_citation"));
        assert_eq!(parsed.usage.as_ref().unwrap().total_tokens, 321);
    }

    #[test]
    fn test_web_search_options_omitted_when_disabled() {
        let body = ChatRequest {
            model: "m".to_string(),
            messages: vec![],
            temperature: 0.0,
            max_tokens: 16,
            web_search_options: None,
        };
        let rendered = serde_json::to_string(&body).unwrap();
        assert!(!rendered.contains("web_search_options"));
    }
}
