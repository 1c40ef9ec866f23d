//! NegotiationStatus enum for tracking lifecycle of negotiation sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a negotiation session.
///
/// Transitions are one-directional: once a session leaves `Ongoing` it never
/// returns. An agreement proposal can still be explicitly ended; the two
/// concluded states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    #[default]
    Ongoing,
    AgreementProposed,
    Ended,
    ConcludedWithoutAgreement,
}

impl NegotiationStatus {
    /// Returns true if the negotiation is still in play.
    pub fn is_ongoing(&self) -> bool {
        matches!(self, NegotiationStatus::Ongoing)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Ongoing -> AgreementProposed | Ended | ConcludedWithoutAgreement
    /// - AgreementProposed -> Ended
    pub fn can_transition_to(&self, target: &NegotiationStatus) -> bool {
        use NegotiationStatus::*;
        matches!(
            (self, target),
            (Ongoing, AgreementProposed)
                | (Ongoing, Ended)
                | (Ongoing, ConcludedWithoutAgreement)
                | (AgreementProposed, Ended)
        )
    }

    /// Wire-format name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationStatus::Ongoing => "ongoing",
            NegotiationStatus::AgreementProposed => "agreement_proposed",
            NegotiationStatus::Ended => "ended",
            NegotiationStatus::ConcludedWithoutAgreement => "concluded_without_agreement",
        }
    }
}

impl fmt::Display for NegotiationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ongoing() {
        assert_eq!(NegotiationStatus::default(), NegotiationStatus::Ongoing);
    }

    #[test]
    fn is_ongoing_works_correctly() {
        assert!(NegotiationStatus::Ongoing.is_ongoing());
        assert!(!NegotiationStatus::AgreementProposed.is_ongoing());
        assert!(!NegotiationStatus::Ended.is_ongoing());
        assert!(!NegotiationStatus::ConcludedWithoutAgreement.is_ongoing());
    }

    #[test]
    fn ongoing_can_reach_every_terminal_state() {
        use NegotiationStatus::*;
        assert!(Ongoing.can_transition_to(&AgreementProposed));
        assert!(Ongoing.can_transition_to(&Ended));
        assert!(Ongoing.can_transition_to(&ConcludedWithoutAgreement));
    }

    #[test]
    fn agreement_proposed_can_still_be_ended() {
        assert!(NegotiationStatus::AgreementProposed.can_transition_to(&NegotiationStatus::Ended));
    }

    #[test]
    fn nothing_returns_to_ongoing() {
        use NegotiationStatus::*;
        for from in [AgreementProposed, Ended, ConcludedWithoutAgreement] {
            assert!(!from.can_transition_to(&Ongoing));
        }
        assert!(!Ongoing.can_transition_to(&Ongoing));
    }

    #[test]
    fn concluded_states_are_terminal() {
        use NegotiationStatus::*;
        for target in [Ongoing, AgreementProposed, Ended, ConcludedWithoutAgreement] {
            assert!(!Ended.can_transition_to(&target));
            assert!(!ConcludedWithoutAgreement.can_transition_to(&target));
        }
    }

    #[test]
    fn agreement_proposed_cannot_auto_conclude() {
        assert!(!NegotiationStatus::AgreementProposed
            .can_transition_to(&NegotiationStatus::ConcludedWithoutAgreement));
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(format!("{}", NegotiationStatus::Ongoing), "ongoing");
        assert_eq!(
            format!("{}", NegotiationStatus::AgreementProposed),
            "agreement_proposed"
        );
        assert_eq!(
            format!("{}", NegotiationStatus::ConcludedWithoutAgreement),
            "concluded_without_agreement"
        );
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&NegotiationStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
        assert_eq!(
            serde_json::to_string(&NegotiationStatus::AgreementProposed).unwrap(),
            "\"agreement_proposed\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: NegotiationStatus = serde_json::from_str("\"ended\"").unwrap();
        assert_eq!(status, NegotiationStatus::Ended);

        let status: NegotiationStatus =
            serde_json::from_str("\"concluded_without_agreement\"").unwrap();
        assert_eq!(status, NegotiationStatus::ConcludedWithoutAgreement);
    }
}
