//! Mock agent
//!
//! Offline fallback that answers from canned replies keyed on a keyword
//! intent. Always available, so it closes the chain when every real
//! provider is missing or failing.

use async_trait::async_trait;

use crate::agents::{Agent, AgentCost, AgentError};

/// Coarse intent derived from keywords in the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "hello", "hi"
    Greeting,
    /// "meeting" together with "schedule"
    MeetingSchedule,
    /// "meeting"
    MeetingQuery,
    /// "task", "todo"
    TaskCreate,
    /// "remind"
    ReminderSet,
    /// "what", "show"
    DataQuery,
    /// Anything else
    Default,
}

impl Intent {
    /// Classify a message; the first matching rule wins
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |needle: &str| lower.contains(needle);

        if has("hello") || has("hi") {
            Intent::Greeting
        } else if has("meeting") && has("schedule") {
            Intent::MeetingSchedule
        } else if has("meeting") {
            Intent::MeetingQuery
        } else if has("task") || has("todo") {
            Intent::TaskCreate
        } else if has("remind") {
            Intent::ReminderSet
        } else if has("what") || has("show") {
            Intent::DataQuery
        } else {
            Intent::Default
        }
    }
}

/// Canned-reply agent
#[derive(Debug, Default)]
pub struct MockAgent;

impl MockAgent {
    /// Create the mock agent
    pub fn new() -> Self {
        Self
    }

    /// Reply for a message
    pub fn reply(&self, message: &str) -> String {
        match Intent::detect(message) {
            Intent::Greeting => {
                "Hello! I'm your AI assistant. How can I help you today?".to_string()
            }
            Intent::MeetingSchedule => "I can help schedule a meeting. What's the meeting about \
                and when would you like to schedule it?"
                .to_string(),
            Intent::MeetingQuery => {
                "I can check your meetings. What timeframe are you interested in?".to_string()
            }
            Intent::TaskCreate => {
                "I can create a task for you. What should I call the task and when is it due?"
                    .to_string()
            }
            Intent::ReminderSet | Intent::DataQuery | Intent::Default => format!(
                "I understand you're asking about: {}. I can help with scheduling meetings, \
                 creating tasks, setting reminders, and answering questions about your schedule.",
                message
            ),
        }
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        "mock"
    }

    fn priority(&self) -> u32 {
        3
    }

    fn cost(&self) -> AgentCost {
        AgentCost::Free
    }

    async fn process(&self, message: &str) -> Result<Option<String>, AgentError> {
        tracing::debug!("Mock agent processing message");
        Ok(Some(self.reply(message)))
    }
}
