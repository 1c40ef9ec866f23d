//! Dialogue facilitation domain model.
//!
//! Stateless sibling of the negotiation model: one statement in, one
//! sentiment/escalation verdict out.

pub mod analysis;

pub use analysis::{
    decode_analysis, failure_analysis, heuristic_analysis, DialogueAnalysis, GENERIC_INTERVENTION,
};
