//! Completion Client Port - Interface for language model backends.
//!
//! This port abstracts all text generation, so the negotiation and
//! facilitation modules never couple to a specific provider API.
//!
//! # Design
//!
//! - One stateless call contract: prompt plus optional history in, text out
//! - [`ChatSession`] layers the stateful variant on top by replaying history,
//!   so backends only ever implement the stateless shape
//! - Failures surface as [`CompletionError`], distinguishable from a valid
//!   (possibly empty) reply
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct MockClient;
//!
//! #[async_trait]
//! impl CompletionClient for MockClient {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
//!         Ok(CompletionResponse {
//!             content: "Hello!".to_string(),
//!             usage: TokenUsage::zero(),
//!             model: "mock".to_string(),
//!             finish_reason: FinishReason::Stop,
//!         })
//!     }
//!
//!     fn client_info(&self) -> ClientInfo {
//!         ClientInfo::new("mock", "mock-model")
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for language model text generation.
///
/// Implementations connect to an external model service and translate
/// between its API and our message types.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a single completion.
    ///
    /// An empty `content` in the response is a valid reply, not an error.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, CompletionError>;

    /// Returns backend information (provider name, model).
    fn client_info(&self) -> ClientInfo;
}

/// Request for text generation.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Conversation messages, oldest first, ending with the current input.
    pub messages: Vec<ChatMessage>,
    /// System instruction guiding model behavior.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single message.
    pub fn with_message(mut self, role: ChatRole, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(role, content));
        self
    }

    /// Replaces the message list wholesale.
    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A message in a model conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User input.
    User,
    /// Model response.
    Assistant,
}

/// Response from text generation.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content. May legitimately be empty.
    pub content: String,
    /// Token usage for the call.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Creates zero usage.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Backend information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
}

impl ClientInfo {
    /// Creates new client info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Stateful chat on top of a stateless backend.
///
/// Holds a system instruction plus the running history and replays both on
/// every [`send`](ChatSession::send). A failed send leaves the history
/// untouched, so a session is always a prefix of successful exchanges.
pub struct ChatSession {
    client: Arc<dyn CompletionClient>,
    system_prompt: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Starts a fresh session.
    pub fn new(client: Arc<dyn CompletionClient>, system_prompt: impl Into<String>) -> Self {
        Self::resume(client, system_prompt, Vec::new())
    }

    /// Rebuilds a session from previously recorded history.
    pub fn resume(
        client: Arc<dyn CompletionClient>,
        system_prompt: impl Into<String>,
        history: Vec<ChatMessage>,
    ) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
            history,
        }
    }

    /// Sends one message and returns the model's reply.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`CompletionError`] unchanged.
    pub async fn send(&mut self, message: impl Into<String>) -> Result<String, CompletionError> {
        let mut messages = self.history.clone();
        messages.push(ChatMessage::user(message));

        let request = CompletionRequest::new()
            .with_system_prompt(self.system_prompt.clone())
            .with_messages(messages.clone());
        let response = self.client.complete(request).await?;

        self.history = messages;
        self.history.push(ChatMessage::assistant(response.content.clone()));
        Ok(response.content)
    }

    /// Returns the exchange history so far, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

/// Completion backend errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Reason for filtering.
        reason: String,
    },

    /// Backend is unavailable.
    #[error("backend unavailable: {message}")]
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

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl CompletionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

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

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                content: format!("echo: {last}"),
                usage: TokenUsage::zero(),
                model: "echo".to_string(),
                finish_reason: FinishReason::Stop,
            })
        }

        fn client_info(&self) -> ClientInfo {
            ClientInfo::new("test", "echo")
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            Err(CompletionError::unavailable("down"))
        }

        fn client_info(&self) -> ClientInfo {
            ClientInfo::new("test", "failing")
        }
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new()
            .with_message(ChatRole::User, "Hello")
            .with_system_prompt("Be terse")
            .with_max_tokens(100)
            .with_temperature(0.7);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert_eq!(request.messages[0].content, "Hello");
        assert_eq!(request.system_prompt, Some("Be terse".to_string()));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn message_constructors_work() {
        let user = ChatMessage::user("Hello");
        let assistant = ChatMessage::assistant("Hi there");

        assert_eq!(user.role, ChatRole::User);
        assert_eq!(assistant.role, ChatRole::Assistant);
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::User).unwrap();
        assert_eq!(json, "\"user\"");

        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn completion_error_displays_correctly() {
        let err = CompletionError::rate_limited(30);
        assert_eq!(err.to_string(), "rate limited: retry after 30s");

        let err = CompletionError::unavailable("connection reset");
        assert_eq!(err.to_string(), "backend unavailable: connection reset");

        let err = CompletionError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "request timed out after 30s");
    }

    #[tokio::test]
    async fn chat_session_accumulates_history() {
        let mut session = ChatSession::new(Arc::new(EchoClient), "system");

        let first = session.send("one").await.unwrap();
        assert_eq!(first, "echo: one");

        let second = session.send("two").await.unwrap();
        assert_eq!(second, "echo: two");

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], ChatMessage::user("one"));
        assert_eq!(history[1], ChatMessage::assistant("echo: one"));
        assert_eq!(history[2], ChatMessage::user("two"));
        assert_eq!(history[3], ChatMessage::assistant("echo: two"));
    }

    #[tokio::test]
    async fn chat_session_resume_replays_prior_exchanges() {
        let prior = vec![
            ChatMessage::user("opening"),
            ChatMessage::assistant("reply"),
        ];
        let mut session = ChatSession::resume(Arc::new(EchoClient), "system", prior);

        session.send("next").await.unwrap();
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn failed_send_leaves_history_untouched() {
        let mut session = ChatSession::new(Arc::new(FailingClient), "system");

        let result = session.send("one").await;
        assert!(result.is_err());
        assert!(session.history().is_empty());
    }
}
