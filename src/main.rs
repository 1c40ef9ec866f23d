//! Parley service entry point
//!
//! Loads configuration, picks real or mock backends from it, and serves the
//! negotiation and facilitator REST APIs.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use parley::adapters::ai::GeminiConfig;
use parley::adapters::http::{facilitator, negotiation, FacilitatorAppState, NegotiationAppState};
use parley::adapters::speech::GoogleSpeechConfig;
use parley::adapters::{
    GeminiClient, GoogleSpeechService, InMemorySessionStore, MockCompletionClient,
};
use parley::config::{AppConfig, ServerConfig};
use parley::ports::{CompletionClient, SessionStore, SpeechService};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .init();

    // Completion backend: Gemini when a key is configured, mock otherwise.
    let completion: Arc<dyn CompletionClient> = match config.ai.api_key.as_ref() {
        Some(key) if config.ai.has_api_key() => {
            let gemini_config = GeminiConfig::new(key.expose_secret().clone())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            info!(model = %config.ai.model, "Using Gemini completion backend");
            Arc::new(GeminiClient::new(gemini_config))
        }
        _ => {
            warn!("No AI API key configured; using the mock completion client");
            Arc::new(MockCompletionClient::new())
        }
    };

    // Speech is optional; without a key the service runs text-only.
    let speech: Option<Arc<dyn SpeechService>> = match config.speech.api_key.as_ref() {
        Some(key) if config.speech.is_enabled() => {
            let speech_config = GoogleSpeechConfig::new(key.expose_secret().clone())
                .with_stt_base_url(config.speech.stt_base_url.clone())
                .with_tts_base_url(config.speech.tts_base_url.clone())
                .with_timeout(config.speech.timeout());
            info!("Speech service enabled (Google Cloud STT/TTS)");
            Some(Arc::new(GoogleSpeechService::new(speech_config)) as Arc<dyn SpeechService>)
        }
        _ => {
            info!("No speech API key configured; audio features disabled");
            None
        }
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let negotiation_state = NegotiationAppState::new(store, completion.clone(), speech.clone());
    let facilitator_state = FacilitatorAppState::new(completion, speech);

    let api = Router::new()
        .merge(negotiation::routes().with_state(negotiation_state))
        .merge(facilitator::routes().with_state(facilitator_state));

    let app = Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    info!(%addr, environment = ?config.server.environment, "Parley listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

/// Service banner, also used as a liveness probe.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Parley negotiation practice API is running. See /api for endpoints."
    }))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
