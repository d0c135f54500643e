//! Error types for the Folio domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Validation failures are reported to the visitor as-is; everything else
//! is surfaced as a generic apology by the gateway.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Folio operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Request validation ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Knowledge base loading ---
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is required")]
    MissingMessage,
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse knowledge file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid knowledge base: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_displays_visitor_text() {
        assert_eq!(
            ValidationError::MissingMessage.to_string(),
            "Message is required"
        );
    }

    #[test]
    fn validation_error_converts_into_error() {
        let err = Error::from(ValidationError::MissingMessage);
        assert!(matches!(err, Error::Validation(ValidationError::MissingMessage)));
        assert_eq!(err.to_string(), "Message is required");
    }

    #[test]
    fn knowledge_error_displays_path() {
        let err = Error::Knowledge(KnowledgeError::ParseError {
            path: PathBuf::from("/tmp/owner.toml"),
            reason: "expected `=`".into(),
        });
        assert!(err.to_string().contains("owner.toml"));
        assert!(err.to_string().contains("expected"));
    }
}
