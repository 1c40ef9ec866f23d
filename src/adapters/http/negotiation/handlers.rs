//! HTTP handlers for negotiation endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::application::handlers::negotiation::{
    GetFeedbackError, GetFeedbackHandler, GetFeedbackQuery, ParticipantSpec,
    StartNegotiationCommand, StartNegotiationError, StartNegotiationHandler, SubmitTurnCommand,
    SubmitTurnError, SubmitTurnHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::negotiation::{KeywordTurnAnalyzer, TurnAnalyzer};
use crate::domain::persona::PersonaCatalog;
use crate::ports::{CompletionClient, SessionStore, SpeechService};

use super::dto::{
    ErrorResponse, FeedbackResponse, NegotiationResponse, PersonasResponse,
    StartNegotiationRequest, SubmitTurnRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct NegotiationAppState {
    pub store: Arc<dyn SessionStore>,
    pub completion: Arc<dyn CompletionClient>,
    pub speech: Option<Arc<dyn SpeechService>>,
    pub personas: Arc<PersonaCatalog>,
    pub analyzer: Arc<dyn TurnAnalyzer>,
}

impl NegotiationAppState {
    /// Builds the state with the built-in persona catalog and keyword
    /// analyzer. Pass `None` for `speech` to run text-only.
    pub fn new(
        store: Arc<dyn SessionStore>,
        completion: Arc<dyn CompletionClient>,
        speech: Option<Arc<dyn SpeechService>>,
    ) -> Self {
        Self {
            store,
            completion,
            speech,
            personas: Arc::new(PersonaCatalog::default()),
            analyzer: Arc::new(KeywordTurnAnalyzer),
        }
    }

    pub fn start_negotiation_handler(&self) -> StartNegotiationHandler {
        StartNegotiationHandler::new(
            self.store.clone(),
            self.completion.clone(),
            self.personas.clone(),
        )
    }

    pub fn submit_turn_handler(&self) -> SubmitTurnHandler {
        SubmitTurnHandler::new(
            self.store.clone(),
            self.completion.clone(),
            self.speech.clone(),
            self.personas.clone(),
            self.analyzer.clone(),
        )
    }

    pub fn get_feedback_handler(&self) -> GetFeedbackHandler {
        GetFeedbackHandler::new(self.store.clone(), self.completion.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// List the available AI negotiator personas
///
/// GET /api/personas
pub async fn list_personas(State(app_state): State<NegotiationAppState>) -> impl IntoResponse {
    let personas = app_state
        .personas
        .keys()
        .into_iter()
        .map(str::to_string)
        .collect();

    (StatusCode::OK, Json(PersonasResponse { personas }))
}

/// Start a new practice negotiation
///
/// POST /api/negotiations
pub async fn start_negotiation(
    State(app_state): State<NegotiationAppState>,
    Json(req): Json<StartNegotiationRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // Create command
    let cmd = StartNegotiationCommand {
        scenario_id: req.scenario_id,
        scenario_description: req.scenario_description,
        user_persona_label: req.user_persona,
        participants: req
            .participants
            .into_iter()
            .map(|p| ParticipantSpec::new(p.id, p.persona_type, p.initial_stance))
            .collect(),
    };

    // Execute command
    let handler = app_state.start_negotiation_handler();
    let result = handler.handle(cmd).await.map_err(|e| match e {
        StartNegotiationError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        ),
    })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(NegotiationResponse::from(result)),
    ))
}

/// Submit one user turn to a running negotiation
///
/// POST /api/negotiations/{session_id}/turns
pub async fn submit_turn(
    State(app_state): State<NegotiationAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitTurnRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // Parse session ID
    let session_id = SessionId::from_str(&session_id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session_id format")),
        )
    })?;

    // Decode audio before touching the session
    let audio = match req.audio_input {
        Some(encoded) => Some(BASE64.decode(encoded.as_bytes()).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid base64 in audio_input")),
            )
        })?),
        None => None,
    };

    // Create command
    let cmd = SubmitTurnCommand {
        session_id,
        speaker_id: req.speaker_id,
        message: req.message,
        audio,
    };

    // Execute command
    let handler = app_state.submit_turn_handler();
    let result = handler.handle(cmd).await.map_err(|e| match e {
        SubmitTurnError::SessionNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &session_id.to_string())),
        ),
        SubmitTurnError::NoInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        ),
    })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(NegotiationResponse::from(result)),
    ))
}

/// Get coaching feedback for a session
///
/// GET /api/negotiations/{session_id}/feedback
pub async fn get_feedback(
    State(app_state): State<NegotiationAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // Parse session ID
    let session_id = SessionId::from_str(&session_id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session_id format")),
        )
    })?;

    // Create query
    let query = GetFeedbackQuery { session_id };

    // Execute query
    let handler = app_state.get_feedback_handler();
    let report = handler.handle(query).await.map_err(|e| match e {
        GetFeedbackError::SessionNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &session_id.to_string())),
        ),
    })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(FeedbackResponse::from(report)),
    ))
}
