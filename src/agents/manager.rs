//! Agent manager
//!
//! Runs a message through the registered agents in priority order. The
//! first agent that returns text wins; agents that decline, fail or time
//! out hand the message to the next one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::agents::{
    Agent, AgentError, AgentInfo, GeminiAgent, MessageProcessor, MockAgent, OpenAiAgent,
};
use crate::config::Config;

/// Priority-ordered chain of agents
pub struct AgentManager {
    agents: Vec<Arc<dyn Agent>>,
    timeout: Duration,
}

impl AgentManager {
    /// Create an empty manager with the given per-agent timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            agents: Vec::new(),
            timeout,
        }
    }

    /// Build the production chain from configuration
    ///
    /// Gemini and OpenAI are only registered when their API key is set.
    /// The mock agent closes the chain unless disabled.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let mut manager = Self::new(config.agents.timeout());

        if let Some(key) = &config.agents.gemini.api_key {
            manager.register(Arc::new(GeminiAgent::new(
                client.clone(),
                key.clone(),
                config.agents.gemini.model.clone(),
                config.agents.gemini.base_url.clone(),
            )));
        }

        if let Some(key) = &config.agents.openai.api_key {
            manager.register(Arc::new(OpenAiAgent::new(
                client,
                key.clone(),
                config.agents.openai.model.clone(),
                config.agents.openai.base_url.clone(),
            )));
        }

        if config.agents.mock_fallback {
            manager.register(Arc::new(MockAgent::new()));
        }

        manager
    }

    /// Add an agent; the chain stays sorted by priority
    ///
    /// Agents with equal priority keep their registration order.
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        info!(
            agent = agent.name(),
            priority = agent.priority(),
            available = agent.is_available(),
            "Registered agent"
        );
        self.agents.push(agent);
        self.agents.sort_by_key(|a| a.priority());
    }

    /// Describe the chain in try order
    pub fn agents(&self) -> Vec<AgentInfo> {
        self.agents
            .iter()
            .map(|a| AgentInfo::from_agent(a.as_ref()))
            .collect()
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is registered
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    async fn call_agent(
        &self,
        agent: &dyn Agent,
        message: &str,
    ) -> Result<Option<String>, AgentError> {
        match tokio::time::timeout(self.timeout, agent.process(message)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[async_trait]
impl MessageProcessor for AgentManager {
    async fn process_message(&self, message: &str) -> Result<String, AgentError> {
        let mut last_error: Option<AgentError> = None;

        for agent in &self.agents {
            if !agent.is_available() {
                debug!(agent = agent.name(), "Skipping unavailable agent");
                continue;
            }

            debug!(agent = agent.name(), "Trying agent");
            match self.call_agent(agent.as_ref(), message).await {
                Ok(Some(reply)) => {
                    info!(
                        agent = agent.name(),
                        cost = ?agent.cost(),
                        response_len = reply.len(),
                        "Response generated"
                    );
                    return Ok(reply);
                }
                Ok(None) => {
                    debug!(agent = agent.name(), "Agent declined message");
                }
                Err(e) => {
                    warn!(agent = agent.name(), error = %e, "Agent failed, falling back");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(AgentError::AllAgentsFailed(e.to_string())),
            None => Err(AgentError::NoResponse),
        }
    }
}
