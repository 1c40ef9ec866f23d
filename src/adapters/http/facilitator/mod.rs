//! HTTP adapters for the dialogue facilitator
//!
//! Exposes the standalone sentiment and de-escalation analysis endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::FacilitatorAppState;
pub use routes::routes;
