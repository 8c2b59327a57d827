//! API module
//!
//! Contains HTTP request handlers and the `message` input extractor

pub mod extract;
pub mod handlers;

pub use extract::{MessageInput, ProcessRequest};
pub use handlers::{list_agents, process_message, root};
