//! GetFeedback query handler.
//!
//! Sends the full transcript to the coaching model and decodes the reply
//! into a structured report. Only the session lookup can fail: an
//! undecodable reply degrades into a fallback report carrying the raw text,
//! and an upstream failure into a failure report naming the cause.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::{Decoded, SessionId};
use crate::domain::negotiation::feedback::{decode_feedback, failure_report, fallback_report};
use crate::domain::negotiation::FeedbackReport;
use crate::domain::persona::prompts;
use crate::ports::{ChatRole, CompletionClient, CompletionRequest, SessionStore, SessionStoreError};

/// Query to generate coaching feedback for a session.
#[derive(Debug, Clone)]
pub struct GetFeedbackQuery {
    /// Session to review.
    pub session_id: SessionId,
}

/// Errors that can occur when requesting feedback.
///
/// Model failures are not listed: they degrade into a failure report so the
/// user always receives something reviewable.
#[derive(Debug, Clone, Error)]
pub enum GetFeedbackError {
    /// No session registered under this id.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

impl From<SessionStoreError> for GetFeedbackError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound { id } => GetFeedbackError::SessionNotFound(id),
        }
    }
}

/// Handler for GetFeedback queries.
pub struct GetFeedbackHandler {
    store: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionClient>,
}

impl GetFeedbackHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(store: Arc<dyn SessionStore>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { store, completion }
    }

    /// Handles a get feedback query.
    ///
    /// Feedback is available at any status; reviewing an ongoing negotiation
    /// is allowed.
    pub async fn handle(&self, query: GetFeedbackQuery) -> Result<FeedbackReport, GetFeedbackError> {
        let handle = self.store.get(&query.session_id).await?;
        let session = handle.lock().await;

        // The coaching call sees the whole transcript, not a window.
        let transcript = prompts::transcript_lines(
            session
                .transcript()
                .iter()
                .map(|entry| (entry.speaker_id(), entry.message())),
        );
        let prompt = prompts::feedback_prompt(
            &transcript,
            session.user_persona_label(),
            session
                .participants()
                .iter()
                .map(|p| (p.id().as_str(), p.persona_type(), p.initial_stance())),
        );
        let request = CompletionRequest::new()
            .with_system_prompt(prompts::FEEDBACK_SYSTEM_PROMPT)
            .with_message(ChatRole::User, prompt);

        let report = match self.completion.complete(request).await {
            Ok(response) => match decode_feedback(&response.content) {
                Decoded::Structured(report) => report,
                Decoded::Fallback(raw) => {
                    warn!(
                        session_id = %query.session_id,
                        "Feedback reply was not decodable JSON; passing raw text through"
                    );
                    fallback_report(raw, session.status())
                }
            },
            Err(err) => {
                warn!(
                    session_id = %query.session_id,
                    error = %err,
                    "Feedback generation failed"
                );
                failure_report(err, session.status())
            }
        };

        Ok(report)
    }
}
