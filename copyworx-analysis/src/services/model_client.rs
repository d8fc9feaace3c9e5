//! Language model API client
//!
//! One request per pipeline invocation, no internal retry. The wall-clock
//! budget is enforced by the pipeline (`tokio::time::timeout`), not here;
//! dropping the in-flight future aborts the underlying transport request.
//!
//! The trait seam exists so integration tests can substitute scripted
//! upstreams for the real provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::AnalysisConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const USER_AGENT: &str = "CopyWorx-Analysis/0.1.0";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Model client errors, classified downstream by the pipeline
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport-level failure (DNS, connect, TLS, read)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream returned a non-success status
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Upstream reply envelope was not decodable
    #[error("Response decode error: {0}")]
    Decode(String),

    /// Upstream reply contained no text content
    #[error("Response contained no text content")]
    Empty,
}

/// Object-safe seam over the hosted model API
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send one completion request and return the raw text of the first
    /// content block.
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ModelError>;
}

/// Client for the Anthropic-style messages API
pub struct AnthropicClient {
    http_client: reqwest::Client,
    api_key: String,
    model_id: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, ModelError> {
        // No total request timeout here: the pipeline enforces the
        // per-endpoint budget and cancels by dropping the future.
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: config.model_api_key.clone(),
            model_id: config.model_id.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ModelError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model_id,
            max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model_id, max_tokens, "Sending model request");

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        reply
            .content
            .into_iter()
            .find_map(|block| {
                let text = block.text?;
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            })
            .ok_or(ModelError::Empty)
    }
}

// ============================================================================
// Messages API wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AnalysisConfig {
        AnalysisConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 5740,
            model_api_key: "sk-test".to_string(),
            model_id: "test-model".to_string(),
            api_base_url: "https://api.example.com/".to_string(),
            log_filter: None,
        }
    }

    #[test]
    fn client_creation() {
        let client = AnthropicClient::new(&test_config());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().name(), "anthropic");
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        let client = AnthropicClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url, "https://api.example.com");
    }

    #[test]
    fn response_envelope_decodes() {
        let raw = r#"{"content":[{"type":"text","text":"{\"score\": 7}"}]}"#;
        let reply: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.content[0].text.as_deref(), Some("{\"score\": 7}"));
    }

    #[test]
    fn blockless_envelope_decodes_to_empty() {
        let raw = r#"{"content":[]}"#;
        let reply: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert!(reply.content.is_empty());
    }
}
