//! Participant descriptor for AI negotiators.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantId, ValidationError};

/// One AI negotiator in a session: who it is, how it behaves, what it wants.
///
/// The persona type is a free string on purpose; unknown types resolve to the
/// neutral persona at prompt-build time instead of failing validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    persona_type: String,
    initial_stance: String,
}

impl Participant {
    /// Creates a participant, rejecting empty fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the id, persona type, or initial stance is blank
    pub fn new(
        id: impl Into<String>,
        persona_type: impl Into<String>,
        initial_stance: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = ParticipantId::new(id)?;
        let persona_type = persona_type.into();
        if persona_type.trim().is_empty() {
            return Err(ValidationError::empty_field("persona_type"));
        }
        let initial_stance = initial_stance.into();
        if initial_stance.trim().is_empty() {
            return Err(ValidationError::empty_field("initial_stance"));
        }
        Ok(Self {
            id,
            persona_type,
            initial_stance,
        })
    }

    /// Returns the participant id.
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    /// Returns the persona type key.
    pub fn persona_type(&self) -> &str {
        &self.persona_type
    }

    /// Returns the opening negotiating position.
    pub fn initial_stance(&self) -> &str {
        &self.initial_stance
    }
}
