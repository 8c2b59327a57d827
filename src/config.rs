//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::time::Duration;

/// Default Gemini API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Agent chain configuration
    pub agents: AgentsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Agent chain configuration
#[derive(Debug, Clone)]
pub struct AgentsConfig {
    /// Upper bound for a single agent call (in seconds)
    pub timeout_secs: u64,
    /// Register the mock agent as the last fallback
    pub mock_fallback: bool,
    /// Gemini provider settings
    pub gemini: ProviderConfig,
    /// OpenAI provider settings
    pub openai: ProviderConfig,
}

/// Settings shared by the HTTP-backed providers
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key; the provider is not registered without one
    pub api_key: Option<String>,
    /// Model name sent with every request
    pub model: String,
    /// Base URL of the provider API
    pub base_url: String,
}

// Keys never reach the logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            server: ServerConfig {
                port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000),
                host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            agents: AgentsConfig {
                timeout_secs: get("AGENT_TIMEOUT_SECS")
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(30),
                mock_fallback: get("AGENT_MOCK_FALLBACK")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(true),
                gemini: ProviderConfig {
                    api_key: get("GEMINI_API_KEY"),
                    model: get("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
                    base_url: get("GEMINI_API_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                },
                openai: ProviderConfig {
                    api_key: get("OPENAI_API_KEY"),
                    model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".to_string()),
                    base_url: get("OPENAI_API_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                },
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AgentsConfig {
    /// Per-agent timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
