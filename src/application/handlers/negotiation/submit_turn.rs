//! SubmitTurn command handler.
//!
//! Resolves the user's input (audio wins over text), appends it to the
//! transcript, fans one turn prompt out to every AI negotiator, and applies
//! the turn analysis to the session status.
//!
//! Degradation rules favor availability: transcription trouble or empty
//! input short-circuits the turn with an advisory hint instead of failing,
//! a failed agent becomes an inline placeholder, and a failed synthesis
//! drops the audio but keeps the text reply. The transcript always grows by
//! exactly one user entry plus one entry per participant on a completed
//! turn.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::{NegotiationStatus, ParticipantId, SessionId};
use crate::domain::negotiation::{ContextMessage, ContextRole, Session, TurnAnalyzer};
use crate::domain::persona::{prompts, PersonaCatalog};
use crate::ports::{
    ChatMessage, ChatSession, CompletionClient, SessionStore, SessionStoreError, SpeechService,
    SynthesizeRequest, TranscribeRequest,
};

use super::start_negotiation::AgentResponse;

/// Command to submit one user turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    /// Session to submit the turn to.
    pub session_id: SessionId,
    /// Transcript identifier for the human speaker.
    pub speaker_id: String,
    /// Text input; ignored when audio is supplied.
    pub message: Option<String>,
    /// Raw audio input, transcribed into the turn text.
    pub audio: Option<Vec<u8>>,
}

impl SubmitTurnCommand {
    /// Creates a text turn.
    pub fn text(
        session_id: SessionId,
        speaker_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            speaker_id: speaker_id.into(),
            message: Some(message.into()),
            audio: None,
        }
    }

    /// Attaches audio input, which takes precedence over any text.
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = Some(audio);
        self
    }
}

/// Errors that can occur when submitting a turn.
///
/// Upstream model and speech failures are not listed: they degrade into the
/// normal result shape rather than failing the request.
#[derive(Debug, Clone, Error)]
pub enum SubmitTurnError {
    /// No session registered under this id.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Neither text nor audio was supplied.
    #[error("Validation error: either message or audio input is required")]
    NoInput,
}

impl From<SessionStoreError> for SubmitTurnError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound { id } => SubmitTurnError::SessionNotFound(id),
        }
    }
}

/// Result of submitting a turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    /// Session the turn was submitted to.
    pub session_id: SessionId,
    /// Agent replies in declared participant order; empty when the turn
    /// short-circuited before any generation.
    pub responses: Vec<AgentResponse>,
    /// Session status after the turn.
    pub status: NegotiationStatus,
    /// Agreed points so far.
    pub agreed_points: Vec<String>,
    /// What the user should do next.
    pub next_action_hint: String,
}

impl SubmitTurnResult {
    /// Builds the short-circuit result: no replies, session state echoed
    /// unchanged, only the response hint carries the diagnostic. The stored
    /// hint is left untouched.
    fn degraded(session: &Session, hint: impl Into<String>) -> Self {
        Self {
            session_id: *session.id(),
            responses: Vec::new(),
            status: session.status(),
            agreed_points: session.agreed_points().to_vec(),
            next_action_hint: hint.into(),
        }
    }
}

/// Handler for SubmitTurn commands.
pub struct SubmitTurnHandler {
    store: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionClient>,
    speech: Option<Arc<dyn SpeechService>>,
    personas: Arc<PersonaCatalog>,
    analyzer: Arc<dyn TurnAnalyzer>,
}

impl SubmitTurnHandler {
    /// Creates a new handler with the given dependencies.
    ///
    /// Pass `None` for `speech` to run text-only.
    pub fn new(
        store: Arc<dyn SessionStore>,
        completion: Arc<dyn CompletionClient>,
        speech: Option<Arc<dyn SpeechService>>,
        personas: Arc<PersonaCatalog>,
        analyzer: Arc<dyn TurnAnalyzer>,
    ) -> Self {
        Self {
            store,
            completion,
            speech,
            personas,
            analyzer,
        }
    }

    /// Handles a submit turn command.
    pub async fn handle(&self, cmd: SubmitTurnCommand) -> Result<SubmitTurnResult, SubmitTurnError> {
        if cmd.message.is_none() && cmd.audio.is_none() {
            return Err(SubmitTurnError::NoInput);
        }

        let handle = self.store.get(&cmd.session_id).await?;
        // The lock spans the whole turn, serializing concurrent submissions
        // against the same session.
        let mut session = handle.lock().await;

        // Resolve the turn text, audio first.
        let user_text = match cmd.audio {
            Some(audio) => match &self.speech {
                Some(speech) => {
                    match speech.transcribe(TranscribeRequest::new(audio)).await {
                        Ok(transcript) => transcript,
                        Err(err) => {
                            warn!(
                                session_id = %cmd.session_id,
                                error = %err,
                                "Audio transcription failed"
                            );
                            return Ok(SubmitTurnResult::degraded(
                                &session,
                                format!("Audio transcription failed: {err}"),
                            ));
                        }
                    }
                }
                None => {
                    warn!(
                        session_id = %cmd.session_id,
                        "Audio submitted but no speech backend is configured"
                    );
                    return Ok(SubmitTurnResult::degraded(
                        &session,
                        "Audio transcription failed: speech backend not configured",
                    ));
                }
            },
            None => cmd.message.unwrap_or_default(),
        };

        if user_text.is_empty() {
            return Ok(SubmitTurnResult::degraded(&session, "No valid input provided."));
        }

        // Record the user's turn, then window the transcript for context.
        session.record_user_message(&cmd.speaker_id, &user_text);
        let window = prompts::transcript_lines(
            session
                .recent_transcript(prompts::CONTEXT_WINDOW)
                .iter()
                .map(|entry| (entry.speaker_id(), entry.message())),
        );

        // Fan out, replaying each agent's private context.
        let outcomes = join_all(session.participants().iter().map(|participant| {
            let client = Arc::clone(&self.completion);
            let profile = self.personas.resolve(participant.persona_type());
            let system_prompt = prompts::negotiator_system_prompt(
                profile,
                participant.initial_stance(),
                session.scenario_description(),
            );
            let turn_prompt = prompts::turn_prompt(
                participant.persona_type(),
                participant.initial_stance(),
                &window,
                &user_text,
            );
            let history: Vec<ChatMessage> = session
                .agent_context(participant.id())
                .iter()
                .map(to_chat_message)
                .collect();
            async move {
                let mut chat = ChatSession::resume(client, system_prompt, history);
                let reply = chat.send(turn_prompt.as_str()).await;
                (turn_prompt, reply)
            }
        }))
        .await;

        // Append in declared order, synthesizing audio best-effort.
        let participants = session.participants().to_vec();
        let mut responses = Vec::with_capacity(participants.len());
        for (participant, (turn_prompt, outcome)) in participants.iter().zip(outcomes) {
            match outcome {
                Ok(reply) => {
                    session.record_agent_reply(participant.id(), turn_prompt, &reply);
                    let mut response = AgentResponse::text(participant.id().as_str(), &reply);
                    if let Some(audio) = self.synthesize_reply(participant.id(), &reply).await {
                        response = response.with_audio(audio);
                    }
                    responses.push(response);
                }
                Err(err) => {
                    warn!(
                        session_id = %cmd.session_id,
                        participant = %participant.id(),
                        error = %err,
                        "Turn generation failed"
                    );
                    let placeholder = format!("Error: Could not generate response. ({err})");
                    session.record_placeholder_reply(participant.id(), &placeholder);
                    responses.push(AgentResponse::text(participant.id().as_str(), placeholder));
                }
            }
        }

        // Status heuristics run on the resolved text against the post-append
        // transcript length.
        let analysis = self
            .analyzer
            .analyze(&user_text, session.transcript().len(), session.status());
        session.apply_analysis(analysis);

        Ok(SubmitTurnResult {
            session_id: *session.id(),
            responses,
            status: session.status(),
            agreed_points: session.agreed_points().to_vec(),
            next_action_hint: session.next_action_hint().to_string(),
        })
    }

    /// Synthesizes one reply, dropping the audio on any failure.
    async fn synthesize_reply(&self, participant_id: &ParticipantId, reply: &str) -> Option<Vec<u8>> {
        let speech = self.speech.as_ref()?;
        match speech.synthesize(SynthesizeRequest::new(reply)).await {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!(
                    participant = %participant_id,
                    error = %err,
                    "Speech synthesis failed; returning text only"
                );
                None
            }
        }
    }
}

fn to_chat_message(message: &ContextMessage) -> ChatMessage {
    match message.role() {
        ContextRole::User => ChatMessage::user(message.content()),
        ContextRole::Assistant => ChatMessage::assistant(message.content()),
    }
}
