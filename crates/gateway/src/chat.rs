//! The chat endpoint.
//!
//! `POST {message, context?, conversationHistory?}` →
//! `{response, confidence, suggestions, timestamp, model}`.
//!
//! - missing or falsy `message` → 400 `{"error": "Message is required"}`
//! - anything else that goes wrong → 500 with a fixed apology and
//!   `"fallback": true`
//!
//! Valid messages are answered after a random simulated delay
//! (see [`folio_config::LatencyConfig`]).

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use folio_config::LatencyConfig;
use folio_core::{ChatReply, ChatRequest, ValidationError};

use crate::SharedState;

/// Shown to visitors whenever the request cannot be answered.
pub const APOLOGY: &str =
    "I apologize, but I'm experiencing some technical difficulties. Please try again in a moment.";

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    pub confidence: f64,
    pub suggestions: Vec<String>,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
    pub model: String,
}

impl ChatResponseBody {
    fn new(reply: ChatReply, model: &str) -> Self {
        Self {
            response: reply.response,
            confidence: reply.confidence,
            suggestions: reply.suggestions,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Failures the chat endpoint reports to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// The caller sent no usable message (400).
    Validation(ValidationError),
    /// Anything else (500). The detail is logged, never sent.
    Internal(String),
}

impl From<folio_core::Error> for ApiError {
    fn from(err: folio_core::Error) -> Self {
        match err {
            folio_core::Error::Validation(v) => ApiError::Validation(v),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(v) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: v.to_string(),
                    fallback: None,
                },
            ),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Error in chat handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: APOLOGY.to_string(),
                        fallback: Some(true),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

// ── Handler ───────────────────────────────────────────────────────────────

/// Answer a chat message. `OPTIONS` never reaches this handler; the CORS
/// middleware answers it.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match answer(&state, body).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn answer(
    state: &SharedState,
    body: Result<Bytes, BytesRejection>,
) -> Result<ChatResponseBody, ApiError> {
    let body = body.map_err(|e| ApiError::Internal(format!("failed to read body: {e}")))?;
    let request = ChatRequest::from_json(&body)?;

    info!(
        message_len = request.message.len(),
        history_turns = request.conversation_history.len(),
        "Chat message received"
    );

    if let Some(delay) = pick_delay(&state.latency) {
        tokio::time::sleep(delay).await;
    }

    let reply = state.responder.respond(&request).await?;
    info!(topic = %reply.topic, confidence = reply.confidence, "Chat reply sent");

    Ok(ChatResponseBody::new(reply, &state.model_name))
}

/// Draw a delay uniformly from the configured range.
pub fn pick_delay(latency: &LatencyConfig) -> Option<Duration> {
    let (low, high) = latency.range()?;
    Some(rand::rng().random_range(low..=high))
}
