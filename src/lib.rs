//! AI Service Library
//!
//! HTTP gateway in front of a chain of AI agents. The binary is in
//! `src/main.rs`; modules are exposed here for testing and embedding.

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use server::build_router;
pub use state::AppState;
