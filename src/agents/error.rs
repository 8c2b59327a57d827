//! Agent-specific error types
//!
//! Errors that can occur while an agent produces a reply (provider calls,
//! timeouts, exhaustion of the fallback chain).

use thiserror::Error;

/// Errors that can occur during message processing
#[derive(Error, Debug)]
pub enum AgentError {
    /// Provider is registered without credentials
    #[error("{0} API key is empty")]
    MissingApiKey(String),

    /// Request could not be sent or its body could not be read
    #[error("Failed to reach {provider} API: {source}")]
    Http {
        /// Provider name
        provider: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("{provider} API returned error status {status}: {body}")]
    Api {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Provider rejected the call with HTTP 429
    #[error("{0} API rate limit exceeded")]
    RateLimited(String),

    /// Provider account has no remaining quota
    #[error("{0} quota exceeded")]
    QuotaExceeded(String),

    /// Response body did not have the expected shape
    #[error("Invalid response from {provider} API: {reason}")]
    InvalidResponse {
        /// Provider name
        provider: String,
        /// What was wrong with the body
        reason: String,
    },

    /// Provider refused to answer the prompt
    #[error("{provider} API blocked the prompt: {reason}")]
    Blocked {
        /// Provider name
        provider: String,
        /// Block reason reported by the provider
        reason: String,
    },

    /// Provider answered with no text
    #[error("{0} API response text is empty")]
    EmptyResponse(String),

    /// Agent call exceeded the configured limit
    #[error("Agent call timed out after {0} seconds")]
    Timeout(u64),

    /// Every agent in the chain failed; carries the last failure
    #[error("All agents failed: {0}")]
    AllAgentsFailed(String),

    /// No agent produced a reply
    #[error("No agent produced a response")]
    NoResponse,
}
