//! HTTP adapters for negotiation practice
//!
//! Exposes REST API endpoints for starting negotiations, submitting turns,
//! and retrieving coaching feedback.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::NegotiationAppState;
pub use routes::routes;
