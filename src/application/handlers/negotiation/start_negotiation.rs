//! StartNegotiation command handler.
//!
//! Creates a session, elicits one opening statement per AI negotiator, and
//! registers the session in the store. Openings are independent of each
//! other: every agent sees only its own seed prompt, never a sibling's
//! opening, so the calls can run concurrently and still append in declared
//! participant order.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::{DomainError, NegotiationStatus, SessionId, ValidationError};
use crate::domain::negotiation::{Participant, Session};
use crate::domain::persona::{prompts, PersonaCatalog};
use crate::ports::{ChatSession, CompletionClient, SessionStore};

/// One AI negotiator entry as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ParticipantSpec {
    /// Caller-chosen identifier, unique within the session.
    pub id: String,
    /// Persona type key; unknown keys resolve to the neutral persona.
    pub persona_type: String,
    /// Opening negotiating position.
    pub initial_stance: String,
}

impl ParticipantSpec {
    /// Creates a participant spec.
    pub fn new(
        id: impl Into<String>,
        persona_type: impl Into<String>,
        initial_stance: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            persona_type: persona_type.into(),
            initial_stance: initial_stance.into(),
        }
    }
}

/// Command to start a practice negotiation.
#[derive(Debug, Clone)]
pub struct StartNegotiationCommand {
    /// Scenario key chosen by the caller.
    pub scenario_id: String,
    /// Scenario text embedded into every negotiator system prompt.
    pub scenario_description: String,
    /// Role name for the human participant.
    pub user_persona_label: String,
    /// AI negotiators in the order their openings should appear.
    pub participants: Vec<ParticipantSpec>,
}

/// Errors that can occur when starting a negotiation.
///
/// Model failures are not errors here: a failed opening becomes an inline
/// placeholder and start-up continues.
#[derive(Debug, Clone, Error)]
pub enum StartNegotiationError {
    /// The command failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ValidationError> for StartNegotiationError {
    fn from(err: ValidationError) -> Self {
        StartNegotiationError::Validation(err.to_string())
    }
}

impl From<DomainError> for StartNegotiationError {
    fn from(err: DomainError) -> Self {
        StartNegotiationError::Validation(err.to_string())
    }
}

/// One AI negotiator's reply within a start or turn result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    /// Which participant spoke.
    pub speaker_id: String,
    /// Reply text, or an inline error placeholder.
    pub message: String,
    /// Synthesized MP3 audio, when speech is configured and synthesis
    /// succeeded.
    pub audio: Option<Vec<u8>>,
}

impl AgentResponse {
    /// Creates a text-only response.
    pub fn text(speaker_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            message: message.into(),
            audio: None,
        }
    }

    /// Attaches synthesized audio.
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = Some(audio);
        self
    }
}

/// Result of starting a negotiation.
#[derive(Debug, Clone)]
pub struct StartNegotiationResult {
    /// Identifier for the new session.
    pub session_id: SessionId,
    /// Opening statements, one per participant in declared order.
    pub responses: Vec<AgentResponse>,
    /// Session status after start-up.
    pub status: NegotiationStatus,
    /// Agreed points so far (empty at start).
    pub agreed_points: Vec<String>,
    /// What the user should do next.
    pub next_action_hint: String,
}

/// Handler for StartNegotiation commands.
pub struct StartNegotiationHandler {
    store: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionClient>,
    personas: Arc<PersonaCatalog>,
}

impl StartNegotiationHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        store: Arc<dyn SessionStore>,
        completion: Arc<dyn CompletionClient>,
        personas: Arc<PersonaCatalog>,
    ) -> Self {
        Self {
            store,
            completion,
            personas,
        }
    }

    /// Handles a start negotiation command.
    pub async fn handle(
        &self,
        cmd: StartNegotiationCommand,
    ) -> Result<StartNegotiationResult, StartNegotiationError> {
        // Validate participants before any model call.
        let mut participants = Vec::with_capacity(cmd.participants.len());
        for spec in cmd.participants {
            participants.push(Participant::new(
                spec.id,
                spec.persona_type,
                spec.initial_stance,
            )?);
        }

        let mut session = Session::new(
            SessionId::new(),
            cmd.scenario_id,
            cmd.scenario_description,
            cmd.user_persona_label,
            participants,
        )?;

        // Fan out one seeded opening request per agent.
        let outcomes = join_all(session.participants().iter().map(|participant| {
            let client = Arc::clone(&self.completion);
            let profile = self.personas.resolve(participant.persona_type());
            let system_prompt = prompts::negotiator_system_prompt(
                profile,
                participant.initial_stance(),
                session.scenario_description(),
            );
            async move {
                let mut chat = ChatSession::new(client, system_prompt);
                chat.send(prompts::OPENING_SEED).await
            }
        }))
        .await;

        // Append in declared order; a failed agent degrades to a placeholder
        // that joins the transcript but not that agent's private context.
        let participants = session.participants().to_vec();
        let mut responses = Vec::with_capacity(participants.len());
        for (participant, outcome) in participants.iter().zip(outcomes) {
            match outcome {
                Ok(reply) => {
                    session.record_agent_reply(participant.id(), prompts::OPENING_SEED, &reply);
                    responses.push(AgentResponse::text(participant.id().as_str(), reply));
                }
                Err(err) => {
                    warn!(
                        session_id = %session.id(),
                        participant = %participant.id(),
                        error = %err,
                        "Opening generation failed"
                    );
                    let placeholder =
                        format!("Error: Could not generate initial greeting. ({err})");
                    session.record_placeholder_reply(participant.id(), &placeholder);
                    responses.push(AgentResponse::text(participant.id().as_str(), placeholder));
                }
            }
        }

        let result = StartNegotiationResult {
            session_id: *session.id(),
            responses,
            status: session.status(),
            agreed_points: session.agreed_points().to_vec(),
            next_action_hint: session.next_action_hint().to_string(),
        };
        self.store.insert(session).await;

        Ok(result)
    }
}
