//! Negotiation command and query handlers.

mod get_feedback;
mod start_negotiation;
mod submit_turn;

pub use get_feedback::{GetFeedbackError, GetFeedbackHandler, GetFeedbackQuery};
pub use start_negotiation::{
    AgentResponse, ParticipantSpec, StartNegotiationCommand, StartNegotiationError,
    StartNegotiationHandler, StartNegotiationResult,
};
pub use submit_turn::{SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult};
