//! Speech adapters - SpeechService implementations.
//!
//! - `GoogleSpeechService` - Google Cloud Speech-to-Text and Text-to-Speech
//! - `MockSpeechService` - scripted transcripts and audio for tests

mod google_speech;
mod mock;

pub use google_speech::{GoogleSpeechConfig, GoogleSpeechService};
pub use mock::MockSpeechService;
