//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the negotiation domain.

mod decode;
mod errors;
mod ids;
mod negotiation_status;
mod timestamp;

pub use decode::{extract_json_object, Decoded};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ParticipantId, SessionId};
pub use negotiation_status::NegotiationStatus;
pub use timestamp::Timestamp;
