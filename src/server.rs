//! HTTP surface: the chat endpoint plus static file serving

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::ai::LlmClient;
use crate::core::{AppConfig, ChatReply, ChatRequest};
use crate::rules::RuleEngine;
use crate::sources::Sources;

/// Which branch answers `/chat`, fixed once at startup.
#[derive(Clone)]
enum Responder {
    Provider(LlmClient),
    Rules(Box<RuleEngine>),
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    responder: Responder,
}

impl AppState {
    /// Pick the provider branch when a credential is configured, the rule
    /// engine otherwise.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let responder = match &config.openai_api_key {
            Some(key) => {
                Responder::Provider(LlmClient::new(key.clone(), config.openai_model.clone()))
            }
            None => Responder::Rules(Box::new(RuleEngine::new(Sources::new(Client::new())))),
        };
        Self { responder }
    }

    #[must_use]
    pub fn with_rule_engine(engine: RuleEngine) -> Self {
        Self {
            responder: Responder::Rules(Box::new(engine)),
        }
    }

    #[must_use]
    pub fn with_provider(client: LlmClient) -> Self {
        Self {
            responder: Responder::Provider(client),
        }
    }
}

/// The application router: `POST /chat`, everything else served from
/// `static_dir`.
#[must_use]
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<Value>)> {
    let correlation_id = Uuid::new_v4().to_string();

    match &state.responder {
        Responder::Provider(client) => {
            match client.complete(&request.history, &request.prompt).await {
                Ok(reply) => {
                    info!("Relayed chat reply (corr_id={})", correlation_id);
                    Ok(Json(ChatReply { reply }))
                }
                Err(e) => {
                    error!("chat completion failed: {} (corr_id={})", e, correlation_id);
                    Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "failed to contact AI" })),
                    ))
                }
            }
        }
        Responder::Rules(engine) => {
            let mut rng = StdRng::from_os_rng();
            let reply = engine.respond(&request.prompt, &mut rng).await;
            info!("Answered from rules (corr_id={})", correlation_id);
            Ok(Json(ChatReply { reply }))
        }
    }
}

/// Bind and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails while
/// serving.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = create_router(state, &config.static_dir);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
