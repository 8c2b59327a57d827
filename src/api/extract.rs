//! `message` input extractor
//!
//! Accepts the message from the query string (`/process?message=...`),
//! a JSON body, or a url-encoded form body, in that order.

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;

use crate::error::AppError;

/// Body and query shape carrying the message
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Text to process
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct MessageParams {
    message: Option<String>,
}

/// Message bound from the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInput(pub String);

#[async_trait]
impl<S> FromRequest<S> for MessageInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<MessageParams>::try_from_uri(req.uri()) {
            Ok(Query(MessageParams {
                message: Some(message),
            })) => return Ok(MessageInput(message)),
            // A present but unparsable `message` must not fall through to the body.
            Err(rejection) if query_names_message(req.uri().query()) => {
                return Err(AppError::InvalidMessage(rejection.body_text()));
            }
            _ => {}
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<ProcessRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidMessage(e.body_text()))?;
            return Ok(MessageInput(body.message));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<ProcessRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidMessage(e.body_text()))?;
            return Ok(MessageInput(body.message));
        }

        Err(AppError::InvalidMessage(
            "missing required field `message`".to_string(),
        ))
    }
}

fn query_names_message(query: Option<&str>) -> bool {
    query
        .unwrap_or_default()
        .split('&')
        .any(|pair| pair.split('=').next() == Some("message"))
}
