//! Shared router state
//!
//! Immutable after startup; cloned into every handler.

use std::sync::Arc;

use crate::agents::{AgentInfo, AgentManager, MessageProcessor};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Capability behind `POST /process`
    pub processor: Arc<dyn MessageProcessor>,
    /// Agent chain as reported by `GET /agents`
    pub agents: Arc<Vec<AgentInfo>>,
}

impl AppState {
    /// State for an arbitrary processor with no agent listing
    pub fn new(processor: Arc<dyn MessageProcessor>) -> Self {
        Self {
            processor,
            agents: Arc::new(Vec::new()),
        }
    }

    /// State backed by an agent manager
    pub fn from_manager(manager: AgentManager) -> Self {
        let agents = Arc::new(manager.agents());
        Self {
            processor: Arc::new(manager),
            agents,
        }
    }
}
