//! Error types and error handling for the application
//!
//! All errors implement `IntoResponse` to provide consistent error formatting:
//! `{"error": <message>, "status": <code>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agents::AgentError;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The `message` input is missing or malformed
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The message processor failed
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidMessage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Agent(AgentError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Agent(AgentError::NoResponse) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Agent(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidMessage("missing".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(AgentError::Timeout(30)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::from(AgentError::NoResponse).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(AgentError::AllAgentsFailed("boom".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("oops")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_agent_error_message_is_passed_through() {
        let err = AppError::from(AgentError::AllAgentsFailed("gemini down".into()));
        assert_eq!(err.to_string(), "All agents failed: gemini down");
    }
}
