//! AI adapters - CompletionClient implementations.
//!
//! - `GeminiClient` - Google Generative Language API
//! - `MockCompletionClient` - scripted responses for tests and keyless runs

mod gemini_client;
mod mock_client;

pub use gemini_client::{GeminiClient, GeminiConfig};
pub use mock_client::{MockCompletionClient, MockError, MockResponse};
