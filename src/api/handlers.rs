//! HTTP request handlers

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

use crate::agents::AgentInfo;
use crate::api::extract::MessageInput;
use crate::error::AppError;
use crate::server::RequestId;
use crate::state::AppState;

/// Liveness payload text
pub const LIVENESS_MESSAGE: &str = "AI Service is running";

/// `GET /` response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Fixed liveness text
    pub message: String,
}

/// `POST /process` response
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    /// Reply produced by the message processor
    pub response: String,
}

/// `GET /agents` response
#[derive(Debug, Serialize)]
pub struct AgentsListResponse {
    /// Agents in try order
    pub agents: Vec<AgentInfo>,
    /// Total number of agents
    pub count: usize,
}

/// GET / - liveness check
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

/// POST /process - run the message through the processor once
pub async fn process_message(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    MessageInput(message): MessageInput,
) -> Result<Json<ProcessResponse>, AppError> {
    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();
    let span = info_span!(
        "process_message",
        request_id = %request_id,
        message_len = message.len(),
    );

    let response = state
        .processor
        .process_message(&message)
        .instrument(span.clone())
        .await?;

    span.in_scope(|| info!(response_len = response.len(), "Message processed"));

    Ok(Json(ProcessResponse { response }))
}

/// GET /agents - list the agent chain
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentsListResponse> {
    let agents = state.agents.as_ref().clone();
    Json(AgentsListResponse {
        count: agents.len(),
        agents,
    })
}
