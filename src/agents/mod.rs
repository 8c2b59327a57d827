//! Agent module
//!
//! The message processing capability behind `POST /process`. The gateway
//! only sees [`MessageProcessor`]; [`AgentManager`] implements it by trying
//! a priority-ordered chain of [`Agent`]s until one answers.

pub mod error;
pub mod gemini;
pub mod gemini_types;
pub mod manager;
pub mod mock;
pub mod openai;

pub use error::AgentError;
pub use gemini::GeminiAgent;
pub use manager::AgentManager;
pub use mock::MockAgent;
pub use openai::OpenAiAgent;

use async_trait::async_trait;
use serde::Serialize;

/// Turns a user message into a reply
#[async_trait]
pub trait MessageProcessor: Send + Sync {
    /// Process a single message and return the reply text
    async fn process_message(&self, message: &str) -> Result<String, AgentError>;
}

/// Billing class of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCost {
    /// No per-call charge
    Free,
    /// Billed per call or token
    Paid,
}

/// A single provider in the agent chain
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Position in the chain; lower runs first
    fn priority(&self) -> u32;

    /// Billing class reported by `GET /agents`
    fn cost(&self) -> AgentCost;

    /// Whether the agent can currently take calls
    fn is_available(&self) -> bool {
        true
    }

    /// Produce a reply, or `Ok(None)` to let the next agent answer
    async fn process(&self, message: &str) -> Result<Option<String>, AgentError>;
}

/// Snapshot of a registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentInfo {
    /// Provider name
    pub name: String,
    /// Position in the chain
    pub priority: u32,
    /// Billing class
    pub cost: AgentCost,
    /// Whether the agent accepts calls
    pub available: bool,
}

impl AgentInfo {
    /// Describe an agent
    pub fn from_agent(agent: &dyn Agent) -> Self {
        Self {
            name: agent.name().to_string(),
            priority: agent.priority(),
            cost: agent.cost(),
            available: agent.is_available(),
        }
    }
}
