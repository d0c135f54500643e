//! HTTP gateway for the Folio portfolio assistant.
//!
//! Exposes the chat endpoint the portfolio front-end talks to, plus
//! health and profile endpoints. Built on Axum.
//!
//! Layers applied to every route:
//! - Permissive CORS (`*` origin); `OPTIONS` is answered by [`cors`]
//! - Request body size limit
//! - HTTP trace logging

pub mod chat;
pub mod cors;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    middleware,
    response::Json,
    routing::{any, get},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use folio_config::{AppConfig, ConfigError, LatencyConfig};
use folio_core::{KeywordResponder, KnowledgeBase, Responder};

/// Shared application state for the gateway. Read-only after startup.
pub struct GatewayState {
    pub responder: Arc<dyn Responder>,
    pub knowledge: Arc<KnowledgeBase>,
    pub latency: LatencyConfig,
    /// Reported in the `model` field of chat replies
    pub model_name: String,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    /// Build state from configuration, loading the knowledge base once.
    /// The configuration is validated first.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let knowledge = config.load_knowledge()?;
        Ok(Self {
            responder: Arc::new(KeywordResponder::new(knowledge.clone())),
            knowledge,
            latency: config.latency.clone(),
            model_name: config.assistant.model_name.clone(),
        })
    }

    /// State with the built-in knowledge base and a custom responder.
    pub fn with_responder(responder: Arc<dyn Responder>, latency: LatencyConfig) -> Self {
        Self {
            responder,
            knowledge: KnowledgeBase::shared(),
            latency,
            model_name: folio_config::AssistantConfig::default().model_name,
        }
    }
}

/// Build the Axum router with all gateway routes.
///
/// The chat endpoint is mounted at `/` and `/chat-llama` and accepts any
/// method; everything except `OPTIONS` is treated as a chat POST.
pub fn build_router(state: SharedState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(chat::chat_handler))
        .route("/chat-llama", any(chat::chat_handler))
        .route("/health", get(health_handler))
        .route("/profile", get(profile_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(cors::cors_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.gateway.bind_addr();
    let state = Arc::new(GatewayState::from_config(&config)?);

    info!(
        responder = state.responder.name(),
        owner = %state.knowledge.personal.name,
        projects = state.knowledge.projects.len(),
        latency_enabled = config.latency.enabled,
        min_ms = config.latency.min_ms,
        max_ms = config.latency.max_ms,
        "Gateway state ready"
    );

    let app = build_router(state, config.gateway.max_body_bytes);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The knowledge base the portfolio sections render.
async fn profile_handler(State(state): State<SharedState>) -> Json<KnowledgeBase> {
    Json(state.knowledge.as_ref().clone())
}
