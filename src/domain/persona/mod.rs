//! Persona module - Negotiator behavioral profiles and prompt assembly.

mod catalog;
pub mod prompts;

pub use catalog::{profiles, PersonaCatalog, PersonaProfile, NEUTRAL_PERSONA};
