//! HTTP DTOs for dialogue facilitator endpoints

use serde::{Deserialize, Serialize};

use crate::domain::facilitator::DialogueAnalysis;

/// Request to analyze one dialogue statement
///
/// `audio_input` carries base64-encoded audio and takes precedence over
/// `message` when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilitateRequest {
    pub speaker_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub audio_input: Option<String>,
}

/// Analysis verdict for one statement
///
/// `intervention` is always present on the wire, null when the statement
/// needs no de-escalation.
#[derive(Debug, Clone, Serialize)]
pub struct FacilitateResponse {
    pub sentiment_score: f32,
    pub escalation_flag: bool,
    pub intervention: Option<String>,
}

impl From<DialogueAnalysis> for FacilitateResponse {
    fn from(analysis: DialogueAnalysis) -> Self {
        Self {
            sentiment_score: analysis.sentiment_score,
            escalation_flag: analysis.escalation_flag,
            intervention: analysis.intervention,
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

    #[test]
    fn test_facilitate_request_text_only() {
        let json = r#"{"speaker_id":"delegate_a","message":"This is outrageous"}"#;
        let req: FacilitateRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.speaker_id, "delegate_a");
        assert_eq!(req.message.as_deref(), Some("This is outrageous"));
        assert!(req.audio_input.is_none());
    }

    #[test]
    fn test_facilitate_response_keeps_null_intervention() {
        let response = FacilitateResponse::from(DialogueAnalysis {
            sentiment_score: 0.4,
            escalation_flag: false,
            intervention: None,
        });
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"intervention\":null"));
        assert!(json.contains("\"escalation_flag\":false"));
    }

    #[test]
    fn test_facilitate_response_carries_intervention_text() {
        let response = FacilitateResponse::from(DialogueAnalysis {
            sentiment_score: -0.8,
            escalation_flag: true,
            intervention: Some("Suggest a short recess.".to_string()),
        });
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("Suggest a short recess."));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse::bad_request("message text is required");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("BAD_REQUEST"));
        assert!(!json.contains("details"));
    }
}
