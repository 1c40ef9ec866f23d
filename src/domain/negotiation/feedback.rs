//! Post-negotiation feedback report and its decoding rules.
//!
//! The coaching model is asked for a JSON object; models pad JSON with
//! chatter, markdown fences, or drop keys entirely. Decoding is strict on
//! shape (all three keys required) but tolerant on placement, and every
//! failure path still yields a usable report.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{extract_json_object, Decoded, NegotiationStatus};

/// Suggestion returned when feedback generation itself failed.
pub const FEEDBACK_FAILURE_SUGGESTION: &str = "Ensure LLM service is running and accessible.";

/// Structured coaching feedback for a finished (or abandoned) negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// Model's verdict on how the negotiation ended.
    pub final_outcome: String,

    /// Narrative assessment of the user's performance.
    pub feedback_summary: String,

    /// Concrete improvement suggestions.
    pub specific_suggestions: Vec<String>,
}

/// Decodes a model reply into a [`FeedbackReport`].
///
/// Tries the raw text as JSON first, then the widest `{...}` slice inside
/// it. A reply missing any required key decodes as [`Decoded::Fallback`]
/// carrying the raw text; partial reports are never fabricated.
pub fn decode_feedback(raw: &str) -> Decoded<FeedbackReport> {
    if let Ok(report) = serde_json::from_str::<FeedbackReport>(raw) {
        return Decoded::Structured(report);
    }
    if let Some(slice) = extract_json_object(raw) {
        if let Ok(report) = serde_json::from_str::<FeedbackReport>(slice) {
            return Decoded::Structured(report);
        }
    }
    Decoded::Fallback(raw.to_string())
}

/// Report used when the model replied but not with decodable JSON.
///
/// The raw reply becomes the summary so the user still sees whatever
/// coaching the model produced.
pub fn fallback_report(raw: impl Into<String>, status: NegotiationStatus) -> FeedbackReport {
    FeedbackReport {
        final_outcome: status.as_str().to_string(),
        feedback_summary: raw.into(),
        specific_suggestions: Vec::new(),
    }
}

/// Report used when the feedback call itself failed.
pub fn failure_report(cause: impl std::fmt::Display, status: NegotiationStatus) -> FeedbackReport {
    FeedbackReport {
        final_outcome: status.as_str().to_string(),
        feedback_summary: format!("Error generating detailed feedback: {cause}"),
        specific_suggestions: vec![FEEDBACK_FAILURE_SUGGESTION.to_string()],
    }
}
