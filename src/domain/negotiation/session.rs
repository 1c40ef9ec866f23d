//! Negotiation session aggregate.
//!
//! A session owns the shared transcript, each agent's private conversational
//! context, and the coarse negotiation status. All mutation goes through the
//! aggregate so its invariants hold regardless of caller.
//!
//! # Invariants
//!
//! - `transcript` is append-only and never reordered
//! - every agent-context append has a same-turn transcript counterpart
//!   (the transcript is the superset view)
//! - `status` never re-enters `Ongoing`
//! - `participants` and the scenario fields are fixed at creation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, NegotiationStatus, ParticipantId, SessionId, Timestamp, ValidationError,
};

use super::{Participant, TurnAnalysis};

/// Hint stored on a freshly created session.
pub const INITIAL_HINT: &str = "Please make your opening statement.";

/// One utterance in the shared transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    speaker_id: String,
    message: String,
}

impl TranscriptEntry {
    /// Creates a transcript entry.
    pub fn new(speaker_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            message: message.into(),
        }
    }

    /// Returns who spoke.
    pub fn speaker_id(&self) -> &str {
        &self.speaker_id
    }

    /// Returns what was said.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Role tag for messages in an agent's private context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRole {
    /// What the agent was told.
    User,
    /// What the agent said.
    Assistant,
}

/// One message in an agent's private context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    role: ContextRole,
    content: String,
}

impl ContextMessage {
    /// Creates a context message.
    pub fn new(role: ContextRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Returns the role tag.
    pub fn role(&self) -> ContextRole {
        self.role
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Negotiation session aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Scenario key chosen at start.
    scenario_id: String,

    /// Scenario text embedded into negotiator system prompts.
    scenario_description: String,

    /// Role name for the human participant.
    user_persona_label: String,

    /// AI negotiators in declared order, fixed at creation.
    participants: Vec<Participant>,

    /// Each agent's private conversational memory.
    agent_contexts: HashMap<ParticipantId, Vec<ContextMessage>>,

    /// Shared append-only transcript across all speakers.
    transcript: Vec<TranscriptEntry>,

    /// Coarse negotiation status.
    status: NegotiationStatus,

    /// Append-only notes about proposed agreements.
    agreed_points: Vec<String>,

    /// Advisory hint, overwritten by every completed turn.
    next_action_hint: String,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new ongoing session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `participants` is empty
    /// - `DuplicateParticipant` if two participants share an id
    pub fn new(
        id: SessionId,
        scenario_id: impl Into<String>,
        scenario_description: impl Into<String>,
        user_persona_label: impl Into<String>,
        participants: Vec<Participant>,
    ) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::validation(
                "participants",
                "At least one AI negotiator is required",
            ));
        }

        let mut agent_contexts = HashMap::with_capacity(participants.len());
        for participant in &participants {
            if agent_contexts
                .insert(participant.id().clone(), Vec::new())
                .is_some()
            {
                return Err(ValidationError::duplicate(
                    "participants",
                    participant.id().as_str(),
                )
                .into());
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            scenario_id: scenario_id.into(),
            scenario_description: scenario_description.into(),
            user_persona_label: user_persona_label.into(),
            participants,
            agent_contexts,
            transcript: Vec::new(),
            status: NegotiationStatus::Ongoing,
            agreed_points: Vec::new(),
            next_action_hint: INITIAL_HINT.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the scenario key.
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// Returns the scenario text.
    pub fn scenario_description(&self) -> &str {
        &self.scenario_description
    }

    /// Returns the human participant's role name.
    pub fn user_persona_label(&self) -> &str {
        &self.user_persona_label
    }

    /// Returns the AI negotiators in declared order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns one agent's private context, empty for unknown ids.
    pub fn agent_context(&self, participant_id: &ParticipantId) -> &[ContextMessage] {
        self.agent_contexts
            .get(participant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the full shared transcript.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Returns the trailing `limit` transcript entries.
    pub fn recent_transcript(&self, limit: usize) -> &[TranscriptEntry] {
        let start = self.transcript.len().saturating_sub(limit);
        &self.transcript[start..]
    }

    /// Returns the current status.
    pub fn status(&self) -> NegotiationStatus {
        self.status
    }

    /// Returns the agreed points so far.
    pub fn agreed_points(&self) -> &[String] {
        &self.agreed_points
    }

    /// Returns the advisory next-action hint.
    pub fn next_action_hint(&self) -> &str {
        &self.next_action_hint
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a user (or other external speaker) message to the transcript.
    pub fn record_user_message(
        &mut self,
        speaker_id: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.transcript.push(TranscriptEntry::new(speaker_id, message));
        self.updated_at = Timestamp::now();
    }

    /// Records a successful agent reply: the (told, said) pair goes to the
    /// agent's private context and the reply to the shared transcript.
    pub fn record_agent_reply(
        &mut self,
        participant_id: &ParticipantId,
        told: impl Into<String>,
        said: impl Into<String>,
    ) {
        let said = said.into();
        if let Some(context) = self.agent_contexts.get_mut(participant_id) {
            context.push(ContextMessage::new(ContextRole::User, told));
            context.push(ContextMessage::new(ContextRole::Assistant, said.clone()));
        }
        self.transcript
            .push(TranscriptEntry::new(participant_id.as_str(), said));
        self.updated_at = Timestamp::now();
    }

    /// Records a failed agent turn: the placeholder text joins the transcript
    /// so turn accounting stays intact, but the agent's private context is
    /// left untouched.
    pub fn record_placeholder_reply(
        &mut self,
        participant_id: &ParticipantId,
        message: impl Into<String>,
    ) {
        self.transcript
            .push(TranscriptEntry::new(participant_id.as_str(), message));
        self.updated_at = Timestamp::now();
    }

    /// Applies a turn analysis: status proposal, agreed point, hint.
    ///
    /// Disallowed status transitions are ignored, keeping the status machine
    /// one-directional no matter what the analyzer proposes.
    pub fn apply_analysis(&mut self, analysis: TurnAnalysis) {
        if let Some(target) = analysis.proposed_status {
            self.advance_status(target);
        }
        if let Some(point) = analysis.agreed_point {
            self.agreed_points.push(point);
        }
        self.next_action_hint = analysis.next_action_hint;
        self.updated_at = Timestamp::now();
    }

    /// Moves the status forward if the transition is allowed.
    ///
    /// Returns whether the status changed.
    pub fn advance_status(&mut self, target: NegotiationStatus) -> bool {
        if self.status.can_transition_to(&target) {
            self.status = target;
            self.updated_at = Timestamp::now();
            true
        } else {
            false
        }
    }
}
