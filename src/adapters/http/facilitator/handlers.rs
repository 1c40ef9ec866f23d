//! HTTP handlers for dialogue facilitator endpoints
//!
//! Audio is resolved to text here, before the application handler runs: the
//! facilitator route treats a speech backend failure as a gateway error
//! rather than degrading, unlike the negotiation turn route.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::application::handlers::facilitator::{
    AnalyzeDialogueCommand, AnalyzeDialogueError, AnalyzeDialogueHandler,
};
use crate::ports::{CompletionClient, SpeechService, TranscribeRequest};

use super::dto::{ErrorResponse, FacilitateRequest, FacilitateResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct FacilitatorAppState {
    pub completion: Arc<dyn CompletionClient>,
    pub speech: Option<Arc<dyn SpeechService>>,
}

impl FacilitatorAppState {
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        speech: Option<Arc<dyn SpeechService>>,
    ) -> Self {
        Self { completion, speech }
    }

    pub fn analyze_dialogue_handler(&self) -> AnalyzeDialogueHandler {
        AnalyzeDialogueHandler::new(self.completion.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Analyze a dialogue statement for sentiment and escalation
///
/// POST /api/dialogue/facilitate
pub async fn facilitate_dialogue(
    State(app_state): State<FacilitatorAppState>,
    Json(req): Json<FacilitateRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // Decode audio
    let audio = match req.audio_input {
        Some(encoded) => Some(BASE64.decode(encoded.as_bytes()).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid base64 in audio_input")),
            )
        })?),
        None => None,
    };

    // Resolve the statement text, audio first
    let text = match audio {
        Some(audio) => {
            let speech = app_state.speech.as_ref().ok_or_else(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal("Speech service is not available")),
                )
            })?;
            speech
                .transcribe(TranscribeRequest::new(audio))
                .await
                .map_err(|err| {
                    (
                        StatusCode::BAD_GATEWAY,
                        Json(ErrorResponse::internal(format!(
                            "Audio transcription failed: {}",
                            err
                        ))),
                    )
                })?
        }
        None => req.message.unwrap_or_default(),
    };

    // Execute command; an empty statement (both inputs absent, or audio
    // transcribed to nothing) is rejected there.
    let cmd = AnalyzeDialogueCommand::new(req.speaker_id, text);
    let handler = app_state.analyze_dialogue_handler();
    let analysis = handler.handle(cmd).await.map_err(|e| match e {
        AnalyzeDialogueError::EmptyMessage => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        ),
    })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(FacilitateResponse::from(analysis)),
    ))
}
