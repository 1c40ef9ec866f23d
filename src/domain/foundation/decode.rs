//! Tagged result for best-effort structured-output decoding.
//!
//! Language-model replies are requested as structured JSON but arrive as
//! free text often enough that every decode site needs a non-raising
//! fallback path. `Decoded` makes the two outcomes explicit so callers can
//! log and test the degraded path instead of papering over it.

/// Outcome of decoding a model reply that was asked to be structured.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The reply parsed as the expected structure.
    Structured(T),
    /// The reply did not parse; the raw text is preserved for fallback
    /// handling.
    Fallback(String),
}

impl<T> Decoded<T> {
    /// Returns true if the reply parsed as structured data.
    pub fn is_structured(&self) -> bool {
        matches!(self, Decoded::Structured(_))
    }

    /// Converts the structured value, leaving fallbacks untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Decoded::Structured(value) => Decoded::Structured(f(value)),
            Decoded::Fallback(raw) => Decoded::Fallback(raw),
        }
    }
}

/// Extracts the first JSON object embedded in free text, if any.
///
/// Models frequently wrap the requested JSON in prose or markdown fences;
/// slicing from the first `{` to the last `}` recovers those replies before
/// the caller gives up and takes the fallback path.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
