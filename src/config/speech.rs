//! Speech service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Speech service configuration
///
/// Speech is optional: without an API key the service runs text-only and
/// audio input short-circuits with an advisory hint. Language, voice, and
/// sample rate are fixed per-request defaults on the speech port.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Google Cloud API key
    pub api_key: Option<Secret<String>>,

    /// Speech-to-Text base URL
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// Text-to-Speech base URL
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a non-empty API key is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate speech configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            stt_base_url: default_stt_base_url(),
            tts_base_url: default_tts_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_stt_base_url() -> String {
    "https://speech.googleapis.com".to_string()
}

fn default_tts_base_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_config_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.stt_base_url, "https://speech.googleapis.com");
        assert_eq!(config.tts_base_url, "https://texttospeech.googleapis.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_enabled_with_key() {
        let config = SpeechConfig {
            api_key: Some(Secret::new("AIza-speech-key".to_string())),
            ..Default::default()
        };
        assert!(config.is_enabled());
    }

    #[test]
    fn test_empty_key_stays_disabled() {
        let config = SpeechConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = SpeechConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
