//! AnalyzeDialogue command handler.
//!
//! Sends one dialogue statement to the facilitator model and decodes the
//! reply into a sentiment/escalation verdict. Input must already be text:
//! audio is resolved upstream, so this handler never touches the speech
//! port.
//!
//! Past validation the handler cannot fail. An unstructured reply runs
//! through the keyword heuristic and an unreachable model yields the
//! conservative failure triple, so callers always get a verdict.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::facilitator::{
    decode_analysis, failure_analysis, heuristic_analysis, DialogueAnalysis,
};
use crate::domain::foundation::Decoded;
use crate::domain::persona::prompts;
use crate::ports::{ChatRole, CompletionClient, CompletionRequest};

/// Command to analyze one dialogue statement.
#[derive(Debug, Clone)]
pub struct AnalyzeDialogueCommand {
    /// Who made the statement.
    pub speaker_id: String,
    /// The statement text, already transcribed if it arrived as audio.
    pub message: String,
}

impl AnalyzeDialogueCommand {
    /// Creates an analyze command.
    pub fn new(speaker_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur when analyzing dialogue.
#[derive(Debug, Clone, Error)]
pub enum AnalyzeDialogueError {
    /// The statement text was empty.
    #[error("Validation error: message text is required")]
    EmptyMessage,
}

/// Handler for AnalyzeDialogue commands.
pub struct AnalyzeDialogueHandler {
    completion: Arc<dyn CompletionClient>,
}

impl AnalyzeDialogueHandler {
    /// Creates a new handler with the given completion backend.
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    /// Handles an analyze dialogue command.
    pub async fn handle(
        &self,
        cmd: AnalyzeDialogueCommand,
    ) -> Result<DialogueAnalysis, AnalyzeDialogueError> {
        if cmd.message.trim().is_empty() {
            return Err(AnalyzeDialogueError::EmptyMessage);
        }

        let request = CompletionRequest::new()
            .with_system_prompt(prompts::FACILITATOR_SYSTEM_PROMPT)
            .with_message(
                ChatRole::User,
                prompts::facilitator_prompt(&cmd.speaker_id, &cmd.message),
            );

        let analysis = match self.completion.complete(request).await {
            Ok(response) => match decode_analysis(&response.content) {
                Decoded::Structured(analysis) => analysis,
                Decoded::Fallback(raw) => {
                    warn!(
                        speaker_id = %cmd.speaker_id,
                        "Facilitator reply was not decodable JSON; applying keyword heuristic"
                    );
                    heuristic_analysis(&raw)
                }
            },
            Err(err) => {
                warn!(
                    speaker_id = %cmd.speaker_id,
                    error = %err,
                    "Dialogue analysis failed"
                );
                failure_analysis(err)
            }
        };

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionClient, MockError};
    use crate::domain::facilitator::GENERIC_INTERVENTION;

    fn handler(completion: MockCompletionClient) -> AnalyzeDialogueHandler {
        AnalyzeDialogueHandler::new(Arc::new(completion))
    }

    #[tokio::test]
    async fn decodes_structured_analysis() {
        let completion = MockCompletionClient::new().with_response(
            r#"{"sentiment_score": -0.9, "escalation_flag": true, "intervention": "Suggest a short recess."}"#,
        );
        let handler = handler(completion);

        let analysis = handler
            .handle(AnalyzeDialogueCommand::new("delegate_two", "This is outrageous!"))
            .await
            .unwrap();

        assert_eq!(analysis.sentiment_score, -0.9);
        assert!(analysis.escalation_flag);
        assert_eq!(analysis.intervention.as_deref(), Some("Suggest a short recess."));
    }

    #[tokio::test]
    async fn prompt_names_speaker_and_statement() {
        let completion = MockCompletionClient::new();
        let handler = handler(completion.clone());

        handler
            .handle(AnalyzeDialogueCommand::new("mediator", "Let us proceed calmly."))
            .await
            .unwrap();

        let calls = completion.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].system_prompt.as_deref(),
            Some(prompts::FACILITATOR_SYSTEM_PROMPT)
        );
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("statement from 'mediator'"));
        assert!(prompt.contains("'Let us proceed calmly.'"));
    }

    #[tokio::test]
    async fn unstructured_reply_runs_the_heuristic() {
        let completion = MockCompletionClient::new()
            .with_response("The tone is clearly negative.\nIntervention: Acknowledge their concern first.");
        let handler = handler(completion);

        let analysis = handler
            .handle(AnalyzeDialogueCommand::new("user", "We reject all of it"))
            .await
            .unwrap();

        assert_eq!(analysis.sentiment_score, -0.8);
        assert!(analysis.escalation_flag);
        assert_eq!(
            analysis.intervention.as_deref(),
            Some("Acknowledge their concern first.")
        );
    }

    #[tokio::test]
    async fn upstream_failure_yields_conservative_verdict() {
        let completion = MockCompletionClient::new().with_error(MockError::Timeout {
            timeout_secs: 30,
        });
        let handler = handler(completion);

        let analysis = handler
            .handle(AnalyzeDialogueCommand::new("user", "hello"))
            .await
            .unwrap();

        assert_eq!(analysis.sentiment_score, 0.0);
        assert!(analysis.escalation_flag);
        assert_eq!(
            analysis.intervention.as_deref(),
            Some("Error processing dialogue: request timed out after 30s. Check LLM service.")
        );
    }

    #[tokio::test]
    async fn escalating_statement_always_carries_an_intervention() {
        let completion = MockCompletionClient::new()
            .with_response(r#"{"sentiment_score": -0.95, "escalation_flag": true, "intervention": "N/A"}"#);
        let handler = handler(completion);

        let analysis = handler
            .handle(AnalyzeDialogueCommand::new("user", "I am done with this charade"))
            .await
            .unwrap();

        assert_eq!(analysis.intervention.as_deref(), Some(GENERIC_INTERVENTION));
    }

    #[tokio::test]
    async fn rejects_blank_message_before_any_model_call() {
        let completion = MockCompletionClient::new();
        let handler = handler(completion.clone());

        let result = handler
            .handle(AnalyzeDialogueCommand::new("user", "   "))
            .await;

        assert!(matches!(result, Err(AnalyzeDialogueError::EmptyMessage)));
        assert_eq!(completion.call_count(), 0);
    }
}
