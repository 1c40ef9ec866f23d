//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod facilitator;
pub mod negotiation;

pub use facilitator::{AnalyzeDialogueCommand, AnalyzeDialogueError, AnalyzeDialogueHandler};
pub use negotiation::{
    AgentResponse, GetFeedbackError, GetFeedbackHandler, GetFeedbackQuery, ParticipantSpec,
    StartNegotiationCommand, StartNegotiationError, StartNegotiationHandler,
    StartNegotiationResult, SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult,
};
