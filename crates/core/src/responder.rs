//! Responder trait — the abstraction the gateway answers chat requests with.
//!
//! The only production implementation is [`KeywordResponder`], which wraps
//! the keyword [`Classifier`]. Tests plug in failing or counting
//! responders to exercise the gateway's error paths.

use async_trait::async_trait;
use std::sync::Arc;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::message::{ChatReply, ChatRequest};

/// Produces a reply for a validated chat request.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Answer a request. `request.message` is guaranteed non-empty.
    async fn respond(&self, request: &ChatRequest) -> Result<ChatReply>;
}

/// Answers with the keyword classifier. Never fails.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    classifier: Classifier,
}

impl KeywordResponder {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            classifier: Classifier::new(knowledge),
        }
    }

    pub fn builtin() -> Self {
        Self {
            classifier: Classifier::builtin(),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.classifier.knowledge()
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn respond(&self, request: &ChatRequest) -> Result<ChatReply> {
        if !request.conversation_history.is_empty() {
            tracing::debug!(
                turns = request.conversation_history.len(),
                "Conversation history received (not used for routing)"
            );
        }
        Ok(self.classifier.classify_request(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Topic;
    use crate::message::{HistoryEntry, Role};

    #[tokio::test]
    async fn keyword_responder_classifies() {
        let responder = KeywordResponder::builtin();
        let reply = responder
            .respond(&ChatRequest::new("What are your skills?"))
            .await
            .unwrap();
        assert_eq!(reply.topic, Topic::Skills);
        assert_eq!(responder.name(), "keyword");
    }

    #[tokio::test]
    async fn history_does_not_change_routing() {
        let responder = KeywordResponder::builtin();
        let history = vec![HistoryEntry {
            role: Role::User,
            content: "Tell me about your projects".into(),
        }];
        let with = responder
            .respond(&ChatRequest::new("hey").with_history(history))
            .await
            .unwrap();
        let without = responder.respond(&ChatRequest::new("hey")).await.unwrap();
        assert_eq!(with, without);
        assert_eq!(with.topic, Topic::Greeting);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let responder: Arc<dyn Responder> = Arc::new(KeywordResponder::builtin());
        let reply = responder.respond(&ChatRequest::new("email?")).await.unwrap();
        assert_eq!(reply.topic, Topic::Contact);
    }
}
