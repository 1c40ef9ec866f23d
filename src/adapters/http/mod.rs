//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod facilitator;
pub mod negotiation;

// Re-export key types for convenience
pub use facilitator::FacilitatorAppState;
pub use negotiation::NegotiationAppState;
