//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - CompletionClient implementations (Gemini, mock)
//! - `http` - Axum REST API
//! - `speech` - SpeechService implementations (Google Cloud, mock)
//! - `storage` - SessionStore implementations (in-memory)

pub mod ai;
pub mod http;
pub mod speech;
pub mod storage;

pub use ai::{GeminiClient, MockCompletionClient};
pub use http::{FacilitatorAppState, NegotiationAppState};
pub use speech::{GoogleSpeechService, MockSpeechService};
pub use storage::InMemorySessionStore;
