//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - Language model text generation, with
//!   [`ChatSession`] layering stateful chat on top
//! - `SpeechService` - Speech-to-text and text-to-speech (optional)
//! - `SessionStore` - In-memory session registry with per-session handles

mod completion_client;
mod session_store;
mod speech_service;

pub use completion_client::{
    ChatMessage, ChatRole, ChatSession, ClientInfo, CompletionClient, CompletionError,
    CompletionRequest, CompletionResponse, FinishReason, TokenUsage,
};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
pub use speech_service::{
    AudioEncoding, SpeechError, SpeechService, SynthesizeRequest, TranscribeRequest,
    DEFAULT_LANGUAGE_CODE, DEFAULT_SAMPLE_RATE_HZ, DEFAULT_VOICE,
};
