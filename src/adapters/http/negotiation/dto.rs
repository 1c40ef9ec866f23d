//! HTTP DTOs for negotiation endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution. Audio crosses this boundary base64-encoded; the ports and
//! application layer speak raw bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::application::handlers::negotiation::{
    AgentResponse, StartNegotiationResult, SubmitTurnResult,
};
use crate::domain::foundation::NegotiationStatus;
use crate::domain::negotiation::FeedbackReport;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One AI negotiator entry in a start request
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub persona_type: String,
    pub initial_stance: String,
}

/// Request to start a practice negotiation
#[derive(Debug, Clone, Deserialize)]
pub struct StartNegotiationRequest {
    pub scenario_id: String,
    #[serde(default)]
    pub scenario_description: String,
    pub user_persona: String,
    pub participants: Vec<ParticipantDto>,
}

/// Request to submit one user turn
///
/// `audio_input` carries base64-encoded audio and takes precedence over
/// `message` when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTurnRequest {
    pub speaker_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub audio_input: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One AI negotiator reply
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponseDto {
    pub speaker_id: String,
    pub message: String,
    /// Base64-encoded MP3, present when synthesis succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_output: Option<String>,
}

impl From<AgentResponse> for AgentResponseDto {
    fn from(response: AgentResponse) -> Self {
        Self {
            speaker_id: response.speaker_id,
            message: response.message,
            audio_output: response.audio.map(|bytes| BASE64.encode(bytes)),
        }
    }
}

/// Response for the start and turn endpoints
#[derive(Debug, Clone, Serialize)]
pub struct NegotiationResponse {
    pub session_id: String,
    pub ai_responses: Vec<AgentResponseDto>,
    pub status: NegotiationStatus,
    pub agreed_points: Vec<String>,
    pub next_action_hint: String,
}

impl From<StartNegotiationResult> for NegotiationResponse {
    fn from(result: StartNegotiationResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            ai_responses: result.responses.into_iter().map(Into::into).collect(),
            status: result.status,
            agreed_points: result.agreed_points,
            next_action_hint: result.next_action_hint,
        }
    }
}

impl From<SubmitTurnResult> for NegotiationResponse {
    fn from(result: SubmitTurnResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            ai_responses: result.responses.into_iter().map(Into::into).collect(),
            status: result.status,
            agreed_points: result.agreed_points,
            next_action_hint: result.next_action_hint,
        }
    }
}

/// Response listing available persona keys
#[derive(Debug, Clone, Serialize)]
pub struct PersonasResponse {
    pub personas: Vec<String>,
}

/// Post-negotiation coaching feedback
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub final_outcome: String,
    pub feedback_summary: String,
    pub specific_suggestions: Vec<String>,
}

impl From<FeedbackReport> for FeedbackResponse {
    fn from(report: FeedbackReport) -> Self {
        Self {
            final_outcome: report.final_outcome,
            feedback_summary: report.feedback_summary,
            specific_suggestions: report.specific_suggestions,
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    #[test]
    fn test_start_request_defaults_scenario_description() {
        let json = r#"{
            "scenario_id": "border_dispute",
            "user_persona": "Trade Minister",
            "participants": [
                {"id": "alpha", "persona_type": "hardliner", "initial_stance": "cede nothing"}
            ]
        }"#;
        let req: StartNegotiationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.scenario_id, "border_dispute");
        assert_eq!(req.scenario_description, "");
        assert_eq!(req.participants.len(), 1);
        assert_eq!(req.participants[0].persona_type, "hardliner");
    }

    #[test]
    fn test_submit_turn_request_text_only() {
        let json = r#"{"speaker_id":"user","message":"We need port access"}"#;
        let req: SubmitTurnRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.speaker_id, "user");
        assert_eq!(req.message.as_deref(), Some("We need port access"));
        assert!(req.audio_input.is_none());
    }

    #[test]
    fn test_submit_turn_request_audio_only() {
        let json = r#"{"speaker_id":"user","audio_input":"AQID"}"#;
        let req: SubmitTurnRequest = serde_json::from_str(json).unwrap();

        assert!(req.message.is_none());
        assert_eq!(req.audio_input.as_deref(), Some("AQID"));
    }

    #[test]
    fn test_agent_response_dto_encodes_audio_as_base64() {
        let dto = AgentResponseDto::from(
            AgentResponse::text("alpha", "We will not move.").with_audio(vec![1, 2, 3]),
        );

        assert_eq!(dto.audio_output.as_deref(), Some("AQID"));
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"audio_output\":\"AQID\""));
    }

    #[test]
    fn test_agent_response_dto_omits_missing_audio() {
        let dto = AgentResponseDto::from(AgentResponse::text("alpha", "We will not move."));
        let json = serde_json::to_string(&dto).unwrap();

        assert!(!json.contains("audio_output"));
    }

    #[test]
    fn test_negotiation_response_from_start_result() {
        let session_id = SessionId::new();
        let result = StartNegotiationResult {
            session_id,
            responses: vec![AgentResponse::text("alpha", "Opening")],
            status: NegotiationStatus::Ongoing,
            agreed_points: vec![],
            next_action_hint: "Respond to the AI negotiators.".to_string(),
        };

        let response = NegotiationResponse::from(result);
        assert_eq!(response.session_id, session_id.to_string());
        assert_eq!(response.ai_responses.len(), 1);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ongoing\""));
        assert!(json.contains("\"ai_responses\""));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse::not_found("Session", "abc-123");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("NOT_FOUND"));
        assert!(json.contains("Session not found: abc-123"));
        assert!(!json.contains("details"));
    }
}
