//! Dialogue analysis triple and its decoding rules.
//!
//! The facilitator model is asked for a JSON object with a sentiment score,
//! an escalation flag, and an optional intervention. Replies arrive in every
//! shape imaginable, so decoding is layered:
//!
//! - structured: JSON parse (direct, then the widest `{...}` slice)
//! - heuristic: keyword scan over unstructured prose
//! - failure: fixed conservative triple when the model was unreachable
//!
//! Whatever the path, the result is normalized: the score lands in
//! [-1.0, 1.0], a missing flag is derived from the score, and an escalating
//! statement always carries an intervention.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{extract_json_object, Decoded};

/// Score below which a statement counts as escalatory when the model
/// supplied no flag of its own.
const DERIVED_ESCALATION_THRESHOLD: f32 = -0.5;

/// Intervention used when a statement escalates but the model offered none.
pub const GENERIC_INTERVENTION: &str =
    "Consider pausing to restate each party's core interests in neutral terms.";

/// Sentiment and escalation verdict for a single statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueAnalysis {
    /// Sentiment in [-1.0, 1.0], negative meaning hostile.
    pub sentiment_score: f32,

    /// Whether the statement escalates the dispute.
    pub escalation_flag: bool,

    /// De-escalation suggestion, always present when `escalation_flag` is
    /// set, otherwise only when the model volunteered one.
    pub intervention: Option<String>,
}

/// Decodes a model reply into a [`DialogueAnalysis`].
///
/// A reply counts as structured when it contains a JSON object with a
/// numeric `sentiment_score`; the flag and intervention are read leniently
/// from the same object. Anything else decodes as [`Decoded::Fallback`]
/// carrying the raw text for [`heuristic_analysis`].
pub fn decode_analysis(raw: &str) -> Decoded<DialogueAnalysis> {
    if let Some(analysis) = parse_analysis_json(raw) {
        return Decoded::Structured(analysis);
    }
    if let Some(slice) = extract_json_object(raw) {
        if let Some(analysis) = parse_analysis_json(slice) {
            return Decoded::Structured(analysis);
        }
    }
    Decoded::Fallback(raw.to_string())
}

/// Best-effort analysis of an unstructured reply.
///
/// "positive" anywhere in the text scores 0.8, otherwise "negative" scores
/// -0.8, otherwise 0.0. An `intervention:` marker (any case) yields the rest
/// of that line. Never fails.
pub fn heuristic_analysis(raw: &str) -> DialogueAnalysis {
    let lowered = raw.to_lowercase();

    let score = if lowered.contains("positive") {
        0.8
    } else if lowered.contains("negative") {
        -0.8
    } else {
        0.0
    };

    let flag =
        lowered.contains("escalation flag: true") || score < DERIVED_ESCALATION_THRESHOLD;

    let intervention = find_marker(raw, "intervention:").map(|idx| {
        raw[idx + "intervention:".len()..]
            .trim_start()
            .lines()
            .next()
            .unwrap_or("")
            .trim_end()
            .to_string()
    });

    normalize(score, Some(flag), intervention)
}

/// Triple returned when the facilitator model was unreachable.
///
/// Escalation defaults to true so a broken analyzer reads as a warning
/// rather than an all-clear.
pub fn failure_analysis(cause: impl std::fmt::Display) -> DialogueAnalysis {
    DialogueAnalysis {
        sentiment_score: 0.0,
        escalation_flag: true,
        intervention: Some(format!(
            "Error processing dialogue: {cause}. Check LLM service."
        )),
    }
}

fn parse_analysis_json(text: &str) -> Option<DialogueAnalysis> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let score = object.get("sentiment_score")?.as_f64()? as f32;
    let flag = object.get("escalation_flag").and_then(Value::as_bool);
    let intervention = object
        .get("intervention")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(normalize(score, flag, intervention))
}

fn normalize(score: f32, flag: Option<bool>, intervention: Option<String>) -> DialogueAnalysis {
    let sentiment_score = if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let escalation_flag = flag.unwrap_or(sentiment_score < DERIVED_ESCALATION_THRESHOLD);

    let mut intervention = intervention.filter(|text| !is_sentinel(text));
    if escalation_flag && intervention.is_none() {
        intervention = Some(GENERIC_INTERVENTION.to_string());
    }

    DialogueAnalysis {
        sentiment_score,
        escalation_flag,
        intervention,
    }
}

/// Intervention strings that mean "nothing to suggest".
fn is_sentinel(text: &str) -> bool {
    let trimmed = text.trim().trim_end_matches('.');
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("no intervention needed")
}

/// ASCII case-insensitive substring search, returning a byte offset.
fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(marker.len())
        .position(|window| window.eq_ignore_ascii_case(marker.as_bytes()))
}
