//! Negotiation domain model.
//!
//! Everything that defines a practice negotiation lives here:
//!
//! - [`Session`]: the aggregate owning transcript, contexts, and status
//! - [`Participant`]: an AI negotiator's descriptor
//! - [`analyzer`]: keyword-driven turn analysis and status proposals
//! - [`feedback`]: the coaching report and its decoding rules

mod participant;
mod session;

pub mod analyzer;
pub mod feedback;

pub use analyzer::{KeywordTurnAnalyzer, TurnAnalysis, TurnAnalyzer};
pub use feedback::FeedbackReport;
pub use participant::Participant;
pub use session::{ContextMessage, ContextRole, Session, TranscriptEntry, INITIAL_HINT};
