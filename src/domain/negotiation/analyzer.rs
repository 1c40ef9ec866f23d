//! Turn analysis strategy for status and agreed-point heuristics.
//!
//! The default implementation is deliberately crude keyword matching; the
//! trait boundary exists so a real classifier can replace it without touching
//! the session state machine.

use crate::domain::foundation::NegotiationStatus;

/// Transcript length beyond which an ongoing negotiation auto-concludes.
pub const AUTO_CONCLUDE_THRESHOLD: usize = 20;

/// Note appended to agreed points when the user proposes an agreement.
pub const AGREED_POINT_NOTE: &str = "User proposed an agreement.";

/// Hint shown after an ordinary turn.
pub const DEFAULT_TURN_HINT: &str = "Consider your next move. What's your proposal?";

/// Hint shown once an agreement has been proposed.
pub const AGREEMENT_HINT: &str = "Consider formalizing an agreement.";

/// Hint shown once the negotiation is explicitly ended.
pub const ENDED_HINT: &str = "Negotiation concluded.";

/// Hint shown when the turn limit concludes the negotiation.
pub const CONCLUDED_HINT: &str = "Turn limit reached. Request feedback to review the negotiation.";

/// Outcome of analyzing one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnAnalysis {
    /// Status the session should move to, if any.
    pub proposed_status: Option<NegotiationStatus>,
    /// Note to append to the agreed points, if any.
    pub agreed_point: Option<String>,
    /// Next-action hint to store on the session.
    pub next_action_hint: String,
}

impl TurnAnalysis {
    /// Analysis that changes nothing but the hint.
    pub fn unchanged() -> Self {
        Self {
            proposed_status: None,
            agreed_point: None,
            next_action_hint: DEFAULT_TURN_HINT.to_string(),
        }
    }
}

/// Strategy for deriving status changes from a completed turn.
pub trait TurnAnalyzer: Send + Sync {
    /// Analyzes the resolved user text against the post-append transcript
    /// length and current status.
    fn analyze(
        &self,
        user_text: &str,
        transcript_len: usize,
        status: NegotiationStatus,
    ) -> TurnAnalysis;
}

/// Default keyword-based analysis.
///
/// Checks run in priority order: agreement keywords beat the explicit end
/// request, which beats the turn-limit auto-conclusion. The turn limit only
/// applies while the negotiation is still ongoing.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordTurnAnalyzer;

impl TurnAnalyzer for KeywordTurnAnalyzer {
    fn analyze(
        &self,
        user_text: &str,
        transcript_len: usize,
        status: NegotiationStatus,
    ) -> TurnAnalysis {
        let lowered = user_text.to_lowercase();

        if lowered.contains("agreement") || lowered.contains("deal") {
            return TurnAnalysis {
                proposed_status: Some(NegotiationStatus::AgreementProposed),
                agreed_point: Some(AGREED_POINT_NOTE.to_string()),
                next_action_hint: AGREEMENT_HINT.to_string(),
            };
        }

        if lowered.contains("end negotiation") {
            return TurnAnalysis {
                proposed_status: Some(NegotiationStatus::Ended),
                agreed_point: None,
                next_action_hint: ENDED_HINT.to_string(),
            };
        }

        if transcript_len > AUTO_CONCLUDE_THRESHOLD && status.is_ongoing() {
            return TurnAnalysis {
                proposed_status: Some(NegotiationStatus::ConcludedWithoutAgreement),
                agreed_point: None,
                next_action_hint: CONCLUDED_HINT.to_string(),
            };
        }

        TurnAnalysis::unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str, len: usize, status: NegotiationStatus) -> TurnAnalysis {
        KeywordTurnAnalyzer.analyze(text, len, status)
    }

    #[test]
    fn plain_message_changes_nothing_but_hint() {
        let analysis = analyze("We need better terms", 4, NegotiationStatus::Ongoing);
        assert_eq!(analysis.proposed_status, None);
        assert_eq!(analysis.agreed_point, None);
        assert_eq!(analysis.next_action_hint, DEFAULT_TURN_HINT);
    }

    #[test]
    fn deal_keyword_proposes_agreement_any_case() {
        for text in ["Let's make a DEAL", "a deal then", "I sense an Agreement forming"] {
            let analysis = analyze(text, 4, NegotiationStatus::Ongoing);
            assert_eq!(
                analysis.proposed_status,
                Some(NegotiationStatus::AgreementProposed),
                "text: {text}"
            );
            assert_eq!(analysis.agreed_point.as_deref(), Some(AGREED_POINT_NOTE));
            assert_eq!(analysis.next_action_hint, AGREEMENT_HINT);
        }
    }

    #[test]
    fn end_negotiation_keyword_ends_session() {
        let analysis = analyze("I want to END NEGOTIATION now", 4, NegotiationStatus::Ongoing);
        assert_eq!(analysis.proposed_status, Some(NegotiationStatus::Ended));
        assert_eq!(analysis.agreed_point, None);
        assert_eq!(analysis.next_action_hint, ENDED_HINT);
    }

    #[test]
    fn agreement_beats_end_when_both_present() {
        let analysis = analyze(
            "Take this deal or we end negotiation",
            4,
            NegotiationStatus::Ongoing,
        );
        assert_eq!(
            analysis.proposed_status,
            Some(NegotiationStatus::AgreementProposed)
        );
    }

    #[test]
    fn long_transcript_concludes_ongoing_session() {
        let analysis = analyze("still talking", 21, NegotiationStatus::Ongoing);
        assert_eq!(
            analysis.proposed_status,
            Some(NegotiationStatus::ConcludedWithoutAgreement)
        );
        assert_eq!(analysis.next_action_hint, CONCLUDED_HINT);
    }

    #[test]
    fn threshold_is_exclusive() {
        let analysis = analyze("still talking", AUTO_CONCLUDE_THRESHOLD, NegotiationStatus::Ongoing);
        assert_eq!(analysis.proposed_status, None);
    }

    #[test]
    fn long_transcript_ignored_when_not_ongoing() {
        let analysis = analyze("still talking", 30, NegotiationStatus::AgreementProposed);
        assert_eq!(analysis.proposed_status, None);
        assert_eq!(analysis.next_action_hint, DEFAULT_TURN_HINT);
    }

    #[test]
    fn keyword_beats_turn_limit() {
        let analysis = analyze("one final deal", 25, NegotiationStatus::Ongoing);
        assert_eq!(
            analysis.proposed_status,
            Some(NegotiationStatus::AgreementProposed)
        );
    }
}
