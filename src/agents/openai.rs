//! OpenAI agent
//!
//! Chat-completions client for the OpenAI API or any compatible endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agents::{Agent, AgentCost, AgentError};

const PROVIDER: &str = "openai";

const SYSTEM_PROMPT: &str = "You are an AI productivity assistant.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Agent backed by an OpenAI-compatible chat completions API
pub struct OpenAiAgent {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiAgent {
    /// Create an agent using a shared HTTP client
    pub fn new(client: reqwest::Client, api_key: String, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send the message as a single user turn and return the reply text
    pub async fn complete(&self, message: &str) -> Result<String, AgentError> {
        if self.api_key.is_empty() {
            return Err(AgentError::MissingApiKey(PROVIDER.to_string()));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, prompt_len = message.len(), "Calling OpenAI API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "OpenAI API returned error status"
            );

            if error_body.contains("insufficient_quota") || error_body.contains("billing") {
                return Err(AgentError::QuotaExceeded(PROVIDER.to_string()));
            }
            if status_code == 429 {
                return Err(AgentError::RateLimited(PROVIDER.to_string()));
            }

            return Err(AgentError::Api {
                provider: PROVIDER.to_string(),
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await.map_err(http_error)?;

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&response_body).map_err(|e| AgentError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("failed to parse JSON: {}", e),
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contains no choices".to_string(),
            })?;

        match choice.message.content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(AgentError::EmptyResponse(PROVIDER.to_string())),
        }
    }
}

fn http_error(source: reqwest::Error) -> AgentError {
    AgentError::Http {
        provider: PROVIDER.to_string(),
        source: source.without_url(),
    }
}

#[async_trait]
impl Agent for OpenAiAgent {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn priority(&self) -> u32 {
        2
    }

    fn cost(&self) -> AgentCost {
        AgentCost::Paid
    }

    // Placeholder keys from sample env files are treated as unset.
    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.contains("your_actual")
    }

    async fn process(&self, message: &str) -> Result<Option<String>, AgentError> {
        self.complete(message).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn agent(api_key: &str, base_url: &str) -> OpenAiAgent {
        OpenAiAgent::new(
            reqwest::Client::new(),
            api_key.to_string(),
            "gpt-3.5-turbo".to_string(),
            base_url.to_string(),
        )
    }

    #[test]
    fn test_placeholder_key_is_unavailable() {
        assert!(!agent("your_actual_key_here", "http://127.0.0.1:1").is_available());
        assert!(!agent("", "http://127.0.0.1:1").is_available());
        assert!(agent("sk-real", "http://127.0.0.1:1").is_available());
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJsonString(
                r#"{"model":"gpt-3.5-turbo","max_tokens":500}"#.to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"{
                    "id": "chatcmpl-1",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "Sure, here you go."},
                        "finish_reason": "stop"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let result = agent("sk-test", &server.url()).process("plan my day").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap().as_deref(), Some("Sure, here you go."));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_quota_exceeded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"code": "insufficient_quota"}}"#)
            .create_async()
            .await;

        let result = agent("sk-test", &server.url()).complete("hi").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AgentError::QuotaExceeded(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_rate_limit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"code": "rate_limit_exceeded"}}"#)
            .create_async()
            .await;

        let result = agent("sk-test", &server.url()).complete("hi").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AgentError::RateLimited(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_no_choices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let result = agent("sk-test", &server.url()).complete("hi").await;

        mock.assert_async().await;
        assert!(result.unwrap_err().to_string().contains("no choices"));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_null_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
            .create_async()
            .await;

        let result = agent("sk-test", &server.url()).complete("hi").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AgentError::EmptyResponse(_))));
    }
}
