//! Persona Catalog
//!
//! Defines the behavioral profiles available for AI negotiators. Each profile
//! carries a short description (listed over the API) and a prompt fragment
//! appended to the negotiator system prompt. Unknown persona types resolve to
//! the neutral profile rather than failing.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Persona key that unknown types fall back to.
pub const NEUTRAL_PERSONA: &str = "neutral";

/// Behavioral profile for an AI negotiator persona.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaProfile {
    key: String,
    description: String,
    prompt_fragment: String,
}

impl PersonaProfile {
    /// Creates a profile from its three parts.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        prompt_fragment: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            prompt_fragment: prompt_fragment.into(),
        }
    }

    /// Catalog key for this persona.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable behavioral summary.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Behavioral instructions appended to the negotiator system prompt.
    pub fn prompt_fragment(&self) -> &str {
        &self.prompt_fragment
    }
}

/// Predefined persona profiles.
pub mod profiles {
    use super::*;

    /// Maximally self-interested negotiator.
    pub fn hardliner() -> PersonaProfile {
        PersonaProfile::new(
            "hardliner",
            "Prioritizes self-interest, rarely concedes, firm and assertive.",
            "You are a hardliner. You prioritize your own interests above all else and rarely \
             concede. You are firm, assertive, and may use strong language. You are difficult to \
             persuade. Your concessions, if any, should be minimal and extracted with great effort.",
        )
    }

    /// Common-ground seeker.
    pub fn compromiser() -> PersonaProfile {
        PersonaProfile::new(
            "compromiser",
            "Seeks common ground, willing to make reasonable concessions, collaborative.",
            "You are a compromiser. You seek common ground and are willing to make reasonable \
             concessions to achieve progress. You aim for mutually beneficial solutions and prefer \
             collaborative language. You are generally open to persuasion if presented with \
             logical arguments.",
        )
    }

    /// Feeling-driven negotiator.
    pub fn emotional_stakeholder() -> PersonaProfile {
        PersonaProfile::new(
            "emotional_stakeholder",
            "Driven by feelings, easily offended, prioritizes being heard over pure logic.",
            "You are an emotional stakeholder. Your responses are heavily influenced by your \
             feelings and perceived respect. You can be easily offended or highly empathetic. \
             Your logic may sometimes be overshadowed by your emotions. You prioritize feeling \
             heard and understood. Avoid purely rational arguments if they don't acknowledge \
             feelings.",
        )
    }

    /// Fallback persona used for unknown types.
    pub fn neutral() -> PersonaProfile {
        PersonaProfile::new(
            NEUTRAL_PERSONA,
            "Aims for a fair outcome based on logic and collaboration.",
            "You are a neutral negotiator, aiming for a fair outcome based on logic and \
             collaboration.",
        )
    }
}

static BUILTIN: Lazy<PersonaCatalog> = Lazy::new(|| {
    PersonaCatalog::new(vec![
        profiles::hardliner(),
        profiles::compromiser(),
        profiles::emotional_stakeholder(),
        profiles::neutral(),
    ])
});

/// Ordered collection of persona profiles with neutral fallback resolution.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    profiles: Vec<PersonaProfile>,
}

impl PersonaCatalog {
    /// Creates a catalog from the given profiles.
    ///
    /// A neutral profile is appended when absent so `resolve` always has a
    /// fallback target.
    pub fn new(profiles: Vec<PersonaProfile>) -> Self {
        let mut profiles = profiles;
        if !profiles.iter().any(|p| p.key() == NEUTRAL_PERSONA) {
            profiles.push(profiles::neutral());
        }
        Self { profiles }
    }

    /// Returns the built-in catalog shared across the process.
    pub fn builtin() -> &'static PersonaCatalog {
        &BUILTIN
    }

    /// Looks up a profile by exact key.
    pub fn get(&self, key: &str) -> Option<&PersonaProfile> {
        self.profiles.iter().find(|p| p.key() == key)
    }

    /// Resolves a persona type, falling back to neutral for unknown keys.
    pub fn resolve(&self, key: &str) -> &PersonaProfile {
        self.get(key).unwrap_or_else(|| {
            self.get(NEUTRAL_PERSONA)
                .expect("catalog construction guarantees a neutral profile")
        })
    }

    /// Persona keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.key()).collect()
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
