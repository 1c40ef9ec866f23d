//! Speech Service Port - Interface for speech-to-text and text-to-speech.
//!
//! Audio is raw bytes here; base64 transport encoding belongs to the HTTP
//! boundary. The whole capability is optional: when no speech backend is
//! configured the rest of the system runs text-only.
//!
//! # Design
//!
//! - `transcribe` returning an empty string means no speech was detected,
//!   which is a valid result, not an error
//! - request defaults mirror browser-captured audio: MP3 at 44.1 kHz, en-US

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sample rate assumed for browser-captured audio.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;

/// Language used when the caller specifies none.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Voice used when the caller specifies none.
pub const DEFAULT_VOICE: &str = "en-US-Neural2-C";

/// Port for speech recognition and synthesis.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Converts speech audio to text.
    ///
    /// # Returns
    ///
    /// The transcript of the first recognition result, or an empty string
    /// when the backend detected no speech.
    async fn transcribe(&self, request: TranscribeRequest) -> Result<String, SpeechError>;

    /// Converts text to speech audio (MP3 bytes).
    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Vec<u8>, SpeechError>;
}

/// Audio container/codec of a transcription request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioEncoding {
    /// MP3, the format browser recorders commonly produce.
    Mp3,
    /// Uncompressed 16-bit PCM.
    Linear16,
}

/// Request to transcribe speech audio.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    /// Raw audio bytes.
    pub audio: Vec<u8>,
    /// Audio codec.
    pub encoding: AudioEncoding,
    /// Sample rate of the recording.
    pub sample_rate_hz: u32,
    /// BCP-47 language code.
    pub language_code: String,
    /// Whether the backend should insert punctuation.
    pub auto_punctuation: bool,
}

impl TranscribeRequest {
    /// Creates a request with browser-audio defaults.
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio,
            encoding: AudioEncoding::Mp3,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            auto_punctuation: true,
        }
    }

    /// Sets the audio codec.
    pub fn with_encoding(mut self, encoding: AudioEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the sample rate.
    pub fn with_sample_rate_hz(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Sets the language.
    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }
}

/// Request to synthesize speech from text.
#[derive(Debug, Clone)]
pub struct SynthesizeRequest {
    /// Text to speak.
    pub text: String,
    /// BCP-47 language code.
    pub language_code: String,
    /// Backend voice name.
    pub voice: String,
}

impl SynthesizeRequest {
    /// Creates a request with the default language and voice.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }

    /// Sets the language.
    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    /// Sets the voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

/// Speech backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// Backend is unavailable.
    #[error("speech backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request (bad audio, unsupported configuration).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SpeechError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_request_has_browser_defaults() {
        let request = TranscribeRequest::new(vec![1, 2, 3]);
        assert_eq!(request.encoding, AudioEncoding::Mp3);
        assert_eq!(request.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(request.language_code, "en-US");
        assert!(request.auto_punctuation);
    }

    #[test]
    fn transcribe_request_builder_overrides() {
        let request = TranscribeRequest::new(vec![])
            .with_encoding(AudioEncoding::Linear16)
            .with_sample_rate_hz(16_000)
            .with_language_code("de-DE");

        assert_eq!(request.encoding, AudioEncoding::Linear16);
        assert_eq!(request.sample_rate_hz, 16_000);
        assert_eq!(request.language_code, "de-DE");
    }

    #[test]
    fn synthesize_request_has_default_voice() {
        let request = SynthesizeRequest::new("hello");
        assert_eq!(request.language_code, "en-US");
        assert_eq!(request.voice, DEFAULT_VOICE);
    }

    #[test]
    fn speech_error_displays_correctly() {
        let err = SpeechError::unavailable("quota exhausted");
        assert_eq!(err.to_string(), "speech backend unavailable: quota exhausted");

        let err = SpeechError::parse("missing audioContent");
        assert_eq!(err.to_string(), "parse error: missing audioContent");
    }
}
