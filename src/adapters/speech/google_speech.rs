//! Google Speech - Implementation of SpeechService for Google Cloud APIs.
//!
//! Speech-to-Text via `speech:recognize` (v1p1beta1, the surface that
//! accepts MP3 input) and Text-to-Speech via `text:synthesize` (v1). Both
//! are simple non-streaming REST calls carrying base64 audio in JSON.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GoogleSpeechConfig::new(api_key);
//! let service = GoogleSpeechService::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{
    AudioEncoding, SpeechError, SpeechService, SynthesizeRequest, TranscribeRequest,
};

/// Configuration for the Google speech service.
#[derive(Debug, Clone)]
pub struct GoogleSpeechConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for Speech-to-Text.
    pub stt_base_url: String,
    /// Base URL for Text-to-Speech.
    pub tts_base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GoogleSpeechConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            stt_base_url: "https://speech.googleapis.com".to_string(),
            tts_base_url: "https://texttospeech.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the Speech-to-Text base URL.
    pub fn with_stt_base_url(mut self, url: impl Into<String>) -> Self {
        self.stt_base_url = url.into();
        self
    }

    /// Sets the Text-to-Speech base URL.
    pub fn with_tts_base_url(mut self, url: impl Into<String>) -> Self {
        self.tts_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Google Cloud speech service implementation.
pub struct GoogleSpeechService {
    config: GoogleSpeechConfig,
    client: Client,
}

impl GoogleSpeechService {
    /// Creates a new service with the given configuration.
    pub fn new(config: GoogleSpeechConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn recognize_url(&self) -> String {
        format!("{}/v1p1beta1/speech:recognize", self.config.stt_base_url)
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.tts_base_url)
    }

    /// Posts a JSON body and maps transport failures.
    async fn post_json<T: Serialize>(&self, url: String, body: &T) -> Result<Response, SpeechError> {
        self.client
            .post(url)
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::network(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    SpeechError::network(format!("Connection failed: {e}"))
                } else {
                    SpeechError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, SpeechError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(SpeechError::AuthenticationFailed),
            400 => {
                if error_body.contains("API key not valid") {
                    Err(SpeechError::AuthenticationFailed)
                } else {
                    Err(SpeechError::InvalidRequest(error_body))
                }
            }
            429 | 500..=599 => Err(SpeechError::unavailable(format!(
                "Server error {status}: {error_body}"
            ))),
            _ => Err(SpeechError::network(format!(
                "Unexpected status {status}: {error_body}"
            ))),
        }
    }
}

#[async_trait]
impl SpeechService for GoogleSpeechService {
    async fn transcribe(&self, request: TranscribeRequest) -> Result<String, SpeechError> {
        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: encoding_name(request.encoding),
                sample_rate_hertz: request.sample_rate_hz,
                language_code: request.language_code,
                enable_automatic_punctuation: request.auto_punctuation,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(&request.audio),
            },
        };

        let response = self.post_json(self.recognize_url(), &body).await?;
        let response = self.handle_response_status(response).await?;

        let recognize_response: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::parse(format!("Failed to parse response: {e}")))?;

        Ok(first_transcript(recognize_response))
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Vec<u8>, SpeechError> {
        let body = TtsRequest {
            input: TtsInput { text: request.text },
            voice: VoiceSelection {
                language_code: request.language_code,
                name: request.voice,
                ssml_gender: "NEUTRAL",
            },
            audio_config: TtsAudioConfig {
                audio_encoding: "MP3",
            },
        };

        let response = self.post_json(self.synthesize_url(), &body).await?;
        let response = self.handle_response_status(response).await?;

        let tts_response: TtsResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::parse(format!("Failed to parse response: {e}")))?;

        decode_audio(tts_response)
    }
}

/// Wire name for an audio codec.
fn encoding_name(encoding: AudioEncoding) -> &'static str {
    match encoding {
        AudioEncoding::Mp3 => "MP3",
        AudioEncoding::Linear16 => "LINEAR16",
    }
}

/// First alternative of the first result, or empty when no speech was heard.
fn first_transcript(response: RecognizeResponse) -> String {
    response
        .results
        .into_iter()
        .next()
        .and_then(|result| result.alternatives.into_iter().next())
        .map(|alternative| alternative.transcript)
        .unwrap_or_default()
}

/// Decodes the base64 audio payload of a synthesis response.
fn decode_audio(response: TtsResponse) -> Result<Vec<u8>, SpeechError> {
    BASE64
        .decode(response.audio_content.as_bytes())
        .map_err(|e| SpeechError::parse(format!("Invalid audioContent: {e}")))
}

// ----- Google Speech API Types -----

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
struct RecognitionConfig {
    encoding: &'static str,
    #[serde(rename = "sampleRateHertz")]
    sample_rate_hertz: u32,
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(rename = "enableAutomaticPunctuation")]
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Serialize)]
struct TtsRequest {
    input: TtsInput,
    voice: VoiceSelection,
    #[serde(rename = "audioConfig")]
    audio_config: TtsAudioConfig,
}

#[derive(Debug, Serialize)]
struct TtsInput {
    text: String,
}

#[derive(Debug, Serialize)]
struct VoiceSelection {
    #[serde(rename = "languageCode")]
    language_code: String,
    name: String,
    #[serde(rename = "ssmlGender")]
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
struct TtsAudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    #[serde(rename = "audioContent", default)]
    audio_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = GoogleSpeechConfig::new("test-key")
            .with_stt_base_url("https://stt.local")
            .with_tts_base_url("https://tts.local")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.stt_base_url, "https://stt.local");
        assert_eq!(config.tts_base_url, "https://tts.local");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn urls_target_the_right_surfaces() {
        let service = GoogleSpeechService::new(GoogleSpeechConfig::new("k"));
        assert_eq!(
            service.recognize_url(),
            "https://speech.googleapis.com/v1p1beta1/speech:recognize"
        );
        assert_eq!(
            service.synthesize_url(),
            "https://texttospeech.googleapis.com/v1/text:synthesize"
        );
    }

    #[test]
    fn encoding_names_match_wire_format() {
        assert_eq!(encoding_name(AudioEncoding::Mp3), "MP3");
        assert_eq!(encoding_name(AudioEncoding::Linear16), "LINEAR16");
    }

    #[test]
    fn recognize_request_serializes_camel_case() {
        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "MP3",
                sample_rate_hertz: 44_100,
                language_code: "en-US".to_string(),
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: "YWJj".to_string(),
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["config"]["sampleRateHertz"], 44_100);
        assert_eq!(value["config"]["enableAutomaticPunctuation"], true);
        assert_eq!(value["audio"]["content"], "YWJj");
    }

    #[test]
    fn first_transcript_takes_first_alternative() {
        let response: RecognizeResponse = serde_json::from_str(
            r#"{"results": [
                {"alternatives": [{"transcript": "hello there"}, {"transcript": "hollow their"}]},
                {"alternatives": [{"transcript": "ignored"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(first_transcript(response), "hello there");
    }

    #[test]
    fn no_results_means_empty_transcript() {
        let response: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_transcript(response), "");
    }

    #[test]
    fn decode_audio_roundtrips() {
        let response = TtsResponse {
            audio_content: BASE64.encode(b"mp3-bytes"),
        };
        assert_eq!(decode_audio(response).unwrap(), b"mp3-bytes");
    }

    #[test]
    fn decode_audio_rejects_bad_base64() {
        let response = TtsResponse {
            audio_content: "not base64!!!".to_string(),
        };
        assert!(matches!(
            decode_audio(response).unwrap_err(),
            SpeechError::Parse(_)
        ));
    }
}
