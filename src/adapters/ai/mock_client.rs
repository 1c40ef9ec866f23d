//! Mock Completion Client for testing and keyless operation.
//!
//! Configurable implementation of the CompletionClient port, letting tests
//! and local runs proceed without a real model backend.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for degradation testing
//! - Simulated delays for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_response("We accept your terms.")
//!     .with_error(MockError::Unavailable { message: "down".to_string() });
//!
//! let response = client.complete(request).await?;
//! assert_eq!(response.content, "We accept your terms.");
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::ports::{
    ClientInfo, CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
    FinishReason, TokenUsage,
};

/// Mock completion client.
///
/// Clones share the same response queue and call history.
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Client info to return.
    info: ClientInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate content filtering.
    ContentFiltered { reason: String },
    /// Simulate backend unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockError::ContentFiltered { reason } => CompletionError::content_filtered(reason),
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::Network { message } => CompletionError::network(message),
            MockError::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionClient {
    /// Creates a new mock client with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ClientInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, TokenUsage::new(10, 20), FinishReason::Stop)
    }

    /// Adds a successful response with full configuration.
    pub fn with_response_full(
        self,
        content: impl Into<String>,
        usage: TokenUsage,
        finish_reason: FinishReason,
    ) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Success {
            content: content.into(),
            usage,
            finish_reason,
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
                usage: TokenUsage::new(5, 10),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn client_info(&self) -> ClientInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatRole;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new().with_message(ChatRole::User, "Hello")
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let client = MockCompletionClient::new().with_response("Hello from mock!");

        let response = client.complete(test_request()).await.unwrap();

        assert_eq!(response.content, "Hello from mock!");
        assert_eq!(response.model, "mock-model-1");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let client = MockCompletionClient::new()
            .with_response("First")
            .with_response("Second")
            .with_response("Third");

        let r1 = client.complete(test_request()).await.unwrap();
        let r2 = client.complete(test_request()).await.unwrap();
        let r3 = client.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(r3.content, "Third");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let client = MockCompletionClient::new().with_response("Only one");

        let r1 = client.complete(test_request()).await.unwrap();
        let r2 = client.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "Only one");
        assert_eq!(r2.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let client = MockCompletionClient::new().with_error(MockError::Unavailable {
            message: "Service down".to_string(),
        });

        let result = client.complete(test_request()).await;

        assert!(matches!(
            result.unwrap_err(),
            CompletionError::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let client = MockCompletionClient::new()
            .with_response("Response 1")
            .with_response("Response 2");

        assert_eq!(client.call_count(), 0);

        client.complete(test_request()).await.unwrap();
        assert_eq!(client.call_count(), 1);

        client.complete(test_request()).await.unwrap();
        assert_eq!(client.call_count(), 2);

        let calls = client.get_calls();
        assert_eq!(calls[0].messages[0].content, "Hello");

        client.clear_calls();
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let client = MockCompletionClient::new()
            .with_response("First")
            .with_response("Second");
        let clone = client.clone();

        let r1 = client.complete(test_request()).await.unwrap();
        let r2 = clone.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn respects_delay() {
        let client = MockCompletionClient::new()
            .with_response("Delayed response")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        client.complete(test_request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn mock_error_converts_to_completion_error() {
        let err: CompletionError = MockError::RateLimited {
            retry_after_secs: 10,
        }
        .into();
        assert!(matches!(
            err,
            CompletionError::RateLimited {
                retry_after_secs: 10
            }
        ));

        let err: CompletionError = MockError::AuthenticationFailed.into();
        assert!(matches!(err, CompletionError::AuthenticationFailed));

        let err: CompletionError = MockError::Timeout { timeout_secs: 30 }.into();
        assert!(matches!(err, CompletionError::Timeout { timeout_secs: 30 }));
    }
}
