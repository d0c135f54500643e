//! # Folio Core
//!
//! Domain types, the owner's knowledge base, and the keyword response
//! classifier behind the portfolio chat endpoint. This crate has **no HTTP
//! dependencies**: the gateway and the CLI both drive it through the
//! [`Responder`] trait.
//!
//! ## Layout
//!
//! - [`knowledge`] — the immutable facts every reply is composed from
//! - [`classifier`] — the ordered first-match rule list
//! - [`responder`] — the async seam the gateway talks to
//! - [`message`] — request/reply value objects and body parsing
//! - [`error`] — error types shared by all crates

pub mod classifier;
pub mod error;
pub mod knowledge;
pub mod message;
pub mod responder;

// Re-export key types at crate root for ergonomics
pub use classifier::{Classifier, Rule, Topic};
pub use error::{Error, KnowledgeError, Result, ValidationError};
pub use knowledge::{Education, KnowledgeBase, Personal, Project, SkillCategory};
pub use message::{ChatReply, ChatRequest, HistoryEntry, Role};
pub use responder::{KeywordResponder, Responder};
