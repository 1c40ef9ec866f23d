//! Domain layer.
//!
//! Pure business logic with no I/O. Submodules:
//!
//! - [`foundation`]: identifiers, timestamps, status machine, error types
//! - [`persona`]: negotiator persona catalog and prompt assembly
//! - [`negotiation`]: the session aggregate, turn analysis, feedback
//! - [`facilitator`]: single-statement sentiment and escalation analysis

pub mod facilitator;
pub mod foundation;
pub mod negotiation;
pub mod persona;
