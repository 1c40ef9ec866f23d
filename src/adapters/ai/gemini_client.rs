//! Gemini Client - Implementation of CompletionClient for Google's Gemini API.
//!
//! Talks to the Generative Language REST API (`generateContent`). One request
//! per completion, no retries: callers own their degradation policy, and a
//! failed agent turn must fail fast rather than stall the whole fan-out.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let client = GeminiClient::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{
    ChatRole, ClientInfo, CompletionClient, CompletionError, CompletionRequest,
    CompletionResponse, FinishReason, TokenUsage,
};

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-pro", "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
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

/// Gemini API client implementation.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|message| {
                // Gemini names the assistant role "model".
                let role = match message.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                GeminiContent {
                    role: Some(role.to_string()),
                    parts: vec![GeminiPart {
                        text: message.content.clone(),
                    }],
                }
            })
            .collect();

        let generation_config =
            if request.max_tokens.is_some() || request.temperature.is_some() {
                Some(GenerationConfig {
                    max_output_tokens: request.max_tokens,
                    temperature: request.temperature,
                })
            } else {
                None
            };

        GeminiRequest {
            contents,
            system_instruction: request.system_prompt.as_ref().map(|prompt| GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: prompt.clone(),
                }],
            }),
            generation_config,
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let gemini_request = self.to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {e}"))
                } else {
                    CompletionError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, CompletionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(CompletionError::AuthenticationFailed),
            429 => Err(CompletionError::rate_limited(parse_retry_delay(&error_body))),
            400 => {
                // Google reports a bad key as 400 INVALID_ARGUMENT.
                if error_body.contains("API key not valid") {
                    Err(CompletionError::AuthenticationFailed)
                } else {
                    Err(CompletionError::InvalidRequest(error_body))
                }
            }
            500..=599 => Err(CompletionError::unavailable(format!(
                "Server error {status}: {error_body}"
            ))),
            _ => Err(CompletionError::network(format!(
                "Unexpected status {status}: {error_body}"
            ))),
        }
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, CompletionError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(format!("Failed to parse response: {e}")))?;

        convert_response(gemini_response, &self.config.model)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo::new("gemini", &self.config.model)
    }
}

/// Converts a decoded Gemini body into our response type.
fn convert_response(
    response: GeminiResponse,
    fallback_model: &str,
) -> Result<CompletionResponse, CompletionError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        // No candidates at all: either the prompt was blocked or the body
        // is malformed.
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(CompletionError::content_filtered(reason));
        }
        return Err(CompletionError::parse("no candidates in response"));
    };

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Error,
    };

    let content = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let usage = response
        .usage_metadata
        .map(|usage| TokenUsage::new(usage.prompt_token_count, usage.candidates_token_count))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: response
            .model_version
            .unwrap_or_else(|| fallback_model.to_string()),
        finish_reason,
    })
}

/// Parses the retry delay Google embeds in 429 error details.
///
/// Looks for `"retryDelay": "32s"` and falls back to 60 seconds.
fn parse_retry_delay(error_body: &str) -> u32 {
    if let Some(idx) = error_body.find("\"retryDelay\"") {
        let rest = &error_body[idx..];
        if let Some(colon) = rest.find(':') {
            let value = rest[colon + 1..].trim_start().trim_start_matches('"');
            if let Some(num_end) = value.find(|c: char| !c.is_ascii_digit()) {
                if num_end > 0 {
                    if let Ok(secs) = value[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    60
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
}
