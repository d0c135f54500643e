//! Chat request and reply value objects.
//!
//! A visitor sends a [`ChatRequest`] → the responder classifies it →
//! a [`ChatReply`] comes back. Neither is mutated after construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::Topic;
use crate::error::{Error, Result, ValidationError};

/// The role of a message sender in the visitor's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The site visitor
    User,
    /// The portfolio assistant
    Assistant,
    /// System instructions
    System,
}

/// One prior turn the front-end sends along with a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// An incoming chat message.
///
/// `context` and `conversation_history` are part of the wire contract the
/// front-end speaks, but the classifier does not route on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The visitor's message
    pub message: String,

    /// Free-text context supplied by the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Prior turns, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// Create a request carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            conversation_history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.conversation_history = history;
        self
    }

    /// Parse a raw request body.
    ///
    /// The front-end contract is loose, so this accepts anything a browser
    /// might send and sorts failures into two buckets:
    ///
    /// - a missing or falsy `message` (`null`, `false`, `0`, `""`) is a
    ///   [`ValidationError::MissingMessage`];
    /// - an unparseable body, a `null` body, or a truthy non-string
    ///   `message` is a server-side failure.
    ///
    /// Malformed `context` or `conversationHistory` values are dropped.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;

        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return Err(Error::Internal("request body is null".into())),
            _ => return Err(ValidationError::MissingMessage.into()),
        };

        let message = match fields.get("message") {
            None => return Err(ValidationError::MissingMessage.into()),
            Some(v) if is_falsy(v) => return Err(ValidationError::MissingMessage.into()),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::Internal(format!(
                    "message must be a string, got {}",
                    json_kind(other)
                )));
            }
        };

        let context = match fields.get("context") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::debug!(kind = json_kind(other), "Ignoring non-string context");
                None
            }
        };

        let conversation_history = match fields.get("conversationHistory") {
            Some(Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Ignoring malformed conversationHistory");
                Vec::new()
            }),
        };

        Ok(Self {
            message,
            context,
            conversation_history,
        })
    }
}

/// JavaScript truthiness for the values a JSON body can carry.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A composed answer from the responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Response text, possibly multi-line
    pub response: String,

    /// Fixed per-topic confidence in `[0, 1]`
    pub confidence: f64,

    /// Follow-up questions the visitor can click
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Which rule produced this reply
    pub topic: Topic,
}
