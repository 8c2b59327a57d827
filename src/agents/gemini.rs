//! Gemini agent
//!
//! Direct HTTP client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;

use crate::agents::gemini_types::{GeminiApiRequest, GeminiApiResponse};
use crate::agents::{Agent, AgentCost, AgentError};

const PROVIDER: &str = "gemini";

/// Key shipped in sample env files; treated as unset
const PLACEHOLDER_KEY: &str = "your_gemini_api_key_here";

/// Agent backed by the Gemini API
pub struct GeminiAgent {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAgent {
    /// Create an agent using a shared HTTP client (connection pooling)
    pub fn new(client: reqwest::Client, api_key: String, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Call the API with a prompt and return the first text part
    ///
    /// # Errors
    /// * `MissingApiKey` if no key is configured
    /// * `Http` if the request cannot be sent or read
    /// * `RateLimited` / `Api` for non-success statuses
    /// * `InvalidResponse`, `Blocked`, `EmptyResponse` for unusable bodies
    pub async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        if self.api_key.is_empty() {
            return Err(AgentError::MissingApiKey(PROVIDER.to_string()));
        }

        // Key travels in a header so it never shows up in URLs or error text.
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiApiRequest::from_text(prompt))
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
                "Gemini API returned error status"
            );

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

        let parsed: GeminiApiResponse =
            serde_json::from_str(&response_body).map_err(|e| AgentError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("failed to parse JSON: {}", e),
            })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AgentError::Blocked {
                provider: PROVIDER.to_string(),
                reason,
            });
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| invalid("response contains no candidates"))?;

        let part = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| invalid("response candidate contains no parts"))?;

        if part.text.is_empty() {
            return Err(AgentError::EmptyResponse(PROVIDER.to_string()));
        }

        tracing::debug!(
            response_len = part.text.len(),
            "Successfully received response from Gemini API"
        );

        Ok(part.text)
    }
}

fn http_error(source: reqwest::Error) -> AgentError {
    AgentError::Http {
        provider: PROVIDER.to_string(),
        source: source.without_url(),
    }
}

fn invalid(reason: &str) -> AgentError {
    AgentError::InvalidResponse {
        provider: PROVIDER.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl Agent for GeminiAgent {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn priority(&self) -> u32 {
        1
    }

    fn cost(&self) -> AgentCost {
        AgentCost::Free
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_KEY
    }

    async fn process(&self, message: &str) -> Result<Option<String>, AgentError> {
        self.generate(message).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn agent(api_key: &str, base_url: &str) -> GeminiAgent {
        GeminiAgent::new(
            reqwest::Client::new(),
            api_key.to_string(),
            "gemini-2.5-flash".to_string(),
            base_url.to_string(),
        )
    }

    #[tokio::test]
    async fn test_empty_api_key() {
        let agent = agent("", "http://127.0.0.1:1");
        assert!(!agent.is_available());
        let result = agent.generate("test prompt").await;
        assert!(matches!(result, Err(AgentError::MissingApiKey(_))));
    }

    #[test]
    fn test_placeholder_key_is_unavailable() {
        assert!(!agent("your_gemini_api_key_here", "http://127.0.0.1:1").is_available());
        assert!(agent("g-real", "http://127.0.0.1:1").is_available());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_api_key() {
        let agent = agent("SUPERSECRETKEY", "http://127.0.0.1:1");
        let err = agent.generate("test prompt").await.unwrap_err();
        assert!(matches!(err, AgentError::Http { .. }));
        let printed = format!("{} {:?}", err, err);
        assert!(!printed.contains("SUPERSECRETKEY"), "key leaked: {}", printed);
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJsonString(
                r#"{"contents":[{"parts":[{"text":"hello"}]}]}"#.to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {
                            "parts": [{"text": "This is a test response"}],
                            "role": "model"
                        },
                        "finishReason": "STOP"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let agent = agent("test-key", &server.url());
        let result = agent.process("hello").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap().as_deref(), Some("This is a test response"));
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_empty_candidates() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        assert!(result.unwrap_err().to_string().contains("no candidates"));
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_blocked_prompt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        let error_msg = result.unwrap_err().to_string();
        assert!(
            error_msg.contains("blocked the prompt: SAFETY"),
            "Error message should mention the block reason, got: {}",
            error_msg
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_rate_limit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(429)
            .with_body(r#"{"error": "Rate limit exceeded"}"#)
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AgentError::RateLimited(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(500)
            .with_body("backend exploded")
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        match result {
            Err(AgentError::Api { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "backend exploded");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to parse JSON"));
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_empty_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#)
            .create_async()
            .await;

        let result = agent("test-key", &server.url()).generate("test prompt").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AgentError::EmptyResponse(_))));
    }
}
